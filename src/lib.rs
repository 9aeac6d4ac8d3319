//! Landmark Guess: see a campus landmark, then find it on the map.

pub mod components;
pub mod levels;
pub mod mapper;
pub mod model;
pub mod overlay;
pub mod scoring;
pub mod state;
pub mod util;
