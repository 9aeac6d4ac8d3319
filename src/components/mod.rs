pub mod app;
pub mod camera_controls;
pub mod countdown_display;
pub mod guess_panel;
pub mod landmark_view;
pub mod map_view;
pub mod result_overlay;

pub use app::App;
