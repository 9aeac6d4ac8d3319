//! Screen-space feedback drawn over the map after a guess is confirmed.

use crate::mapper::{ViewTransform, raw_to_screen};
use crate::model::{ImageSize, Round, ViewPoint};

pub const CIRCLE_RADIUS: f64 = 20.0;
pub const STROKE_WIDTH: f64 = 2.0;
pub const LABEL_ANCHOR: ViewPoint = ViewPoint::new(50.0, 50.0);
pub const LABEL_FONT: &str = "50px sans-serif";
pub const INK: &str = "#1f4fff";

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayScene {
    pub marker: ViewPoint,
    pub target: ViewPoint,
    pub score: u32,
}

impl OverlayScene {
    /// Projects the confirmed marker and the target through the transform
    /// as it is right now. `None` until the round is confirmed.
    pub fn from_round(
        round: &Round,
        transform: &ViewTransform,
        image: Option<ImageSize>,
    ) -> Option<Self> {
        let report = round.report()?;
        let marker = round.marker()?;
        Some(Self {
            marker: raw_to_screen(marker, transform, image),
            target: raw_to_screen(round.target, transform, image),
            score: report.score,
        })
    }

    pub fn label(&self) -> String {
        format!("Score: {}", self.score)
    }
}
