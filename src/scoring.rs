//! Distance-based scoring of a confirmed guess.

use crate::model::RawPoint;

pub const MAX_SCORE: u32 = 1000;
pub const MIN_SCORE: u32 = 0;
/// Guesses within this raw-pixel radius of the target earn the full score.
pub const PERFECT_RADIUS: f64 = 15.0;
/// Guesses further than this score nothing.
pub const ZERO_RADIUS: f64 = 500.0;
/// Points lost per whole raw pixel of distance.
pub const POINTS_PER_PIXEL: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreReport {
    pub score: u32,
    pub distance: f64,
}

impl ScoreReport {
    pub fn verdict(&self) -> &'static str {
        match self.score {
            MAX_SCORE => "Perfect!",
            s if s >= 600 => "Close",
            s if s > MIN_SCORE => "Far off",
            _ => "Missed",
        }
    }
}

pub fn distance(a: RawPoint, b: RawPoint) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

pub fn score(distance: f64) -> u32 {
    if distance <= PERFECT_RADIUS {
        MAX_SCORE
    } else if distance > ZERO_RADIUS {
        MIN_SCORE
    } else {
        let penalty = POINTS_PER_PIXEL as f64 * distance.floor();
        (MAX_SCORE as f64 - penalty).max(MIN_SCORE as f64) as u32
    }
}

pub fn report(marker: RawPoint, target: RawPoint) -> ScoreReport {
    let distance = distance(marker, target);
    ScoreReport {
        score: score(distance),
        distance,
    }
}
