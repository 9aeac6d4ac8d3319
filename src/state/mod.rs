pub mod camera;
pub mod countdown;
pub mod touch;

pub use camera::Camera;
pub use countdown::{Countdown, CountdownEvent};
pub use touch::{TouchOutcome, TouchState};
