//! Core data models for Landmark Guess.
//! Points in the two coordinate spaces, and the per-round guess state.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::scoring::{self, ScoreReport};

/// Width of the logical map image every target and guess is expressed in.
pub const RAW_IMAGE_WIDTH: f64 = 760.0;
/// Height of the logical map image.
pub const RAW_IMAGE_HEIGHT: f64 = 400.0;

/// A location on the map in raw image space, independent of zoom/pan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

impl RawPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        (0.0..=RAW_IMAGE_WIDTH).contains(&self.x) && (0.0..=RAW_IMAGE_HEIGHT).contains(&self.y)
    }
}

/// A location in canvas pixels under the live view transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewPoint {
    pub x: f64,
    pub y: f64,
}

impl ViewPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Intrinsic (decoded) pixel size of the map image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// `None` for a broken or undecoded image, which reports a 0×0 natural size.
    pub fn from_natural(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundPhase {
    /// No marker on the map.
    Idle,
    /// A tap registered; the confirm control is visible.
    MarkerPlaced { marker: RawPoint },
    /// Terminal. Touch input is ignored and the score is fixed.
    Confirmed { marker: RawPoint, report: ScoreReport },
}

/// One guess against a single fixed target.
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    pub target: RawPoint,
    pub phase: RoundPhase,
}

impl Round {
    pub fn new(target: RawPoint) -> Self {
        Self {
            target,
            phase: RoundPhase::Idle,
        }
    }

    pub fn marker(&self) -> Option<RawPoint> {
        match self.phase {
            RoundPhase::Idle => None,
            RoundPhase::MarkerPlaced { marker } | RoundPhase::Confirmed { marker, .. } => {
                Some(marker)
            }
        }
    }

    pub fn report(&self) -> Option<ScoreReport> {
        match self.phase {
            RoundPhase::Confirmed { report, .. } => Some(report),
            _ => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.phase, RoundPhase::Confirmed { .. })
    }

    /// The confirm control is only offered while a marker is placed.
    pub fn can_confirm(&self) -> bool {
        matches!(self.phase, RoundPhase::MarkerPlaced { .. })
    }

    pub fn tap(&self, raw: RawPoint) -> RoundPhase {
        match self.phase {
            RoundPhase::Confirmed { .. } => self.phase,
            _ => RoundPhase::MarkerPlaced { marker: raw },
        }
    }

    pub fn pan(&self) -> RoundPhase {
        match self.phase {
            RoundPhase::MarkerPlaced { .. } => RoundPhase::Idle,
            other => other,
        }
    }

    /// Freezes the marker and scores it. Scoring happens here and nowhere else.
    pub fn confirm(&self) -> RoundPhase {
        match self.phase {
            RoundPhase::MarkerPlaced { marker } => RoundPhase::Confirmed {
                marker,
                report: scoring::report(marker, self.target),
            },
            other => other,
        }
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum RoundAction {
    Tap { raw: RawPoint },
    Pan,
    Confirm,
}

impl Reducible for Round {
    type Action = RoundAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use RoundAction::*;
        let phase = match action {
            Tap { raw } => self.tap(raw),
            Pan => self.pan(),
            Confirm => self.confirm(),
        };
        if phase == self.phase {
            return self;
        }
        Rc::new(Round {
            target: self.target,
            phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: RawPoint = RawPoint::new(380.0, 200.0);

    fn reduce(round: Round, actions: &[RoundAction]) -> Rc<Round> {
        actions
            .iter()
            .cloned()
            .fold(Rc::new(round), |r, a| r.reduce(a))
    }

    #[test]
    fn tap_places_marker_and_offers_confirm() {
        let r = reduce(Round::new(CENTER), &[RoundAction::Tap { raw: RawPoint::new(10.0, 20.0) }]);
        assert_eq!(r.marker(), Some(RawPoint::new(10.0, 20.0)));
        assert!(r.can_confirm());
        assert!(r.report().is_none());
    }

    #[test]
    fn second_tap_moves_marker() {
        let r = reduce(
            Round::new(CENTER),
            &[
                RoundAction::Tap { raw: RawPoint::new(10.0, 20.0) },
                RoundAction::Tap { raw: RawPoint::new(30.0, 40.0) },
            ],
        );
        assert_eq!(r.marker(), Some(RawPoint::new(30.0, 40.0)));
    }

    #[test]
    fn pan_clears_placed_marker() {
        let r = reduce(
            Round::new(CENTER),
            &[RoundAction::Tap { raw: RawPoint::new(10.0, 20.0) }, RoundAction::Pan],
        );
        assert_eq!(r.phase, RoundPhase::Idle);
        assert!(!r.can_confirm());
    }

    #[test]
    fn confirm_from_idle_is_ignored() {
        let r = reduce(Round::new(CENTER), &[RoundAction::Confirm]);
        assert_eq!(r.phase, RoundPhase::Idle);
    }

    #[test]
    fn confirm_scores_once_and_is_terminal() {
        let r = reduce(
            Round::new(CENTER),
            &[RoundAction::Tap { raw: RawPoint::new(380.0, 515.0) }, RoundAction::Confirm],
        );
        let report = r.report().expect("confirmed");
        assert_eq!(report.score, 370);

        let after = reduce(
            (*r).clone(),
            &[
                RoundAction::Tap { raw: CENTER },
                RoundAction::Pan,
                RoundAction::Confirm,
            ],
        );
        assert_eq!(after.marker(), Some(RawPoint::new(380.0, 515.0)));
        assert_eq!(after.report(), Some(report));
    }

    #[test]
    fn unchanged_phase_keeps_same_rc() {
        let r = Rc::new(Round::new(CENTER));
        let same = r.clone().reduce(RoundAction::Pan);
        assert!(Rc::ptr_eq(&r, &same));
    }

    #[test]
    fn new_round_starts_idle_against_its_target() {
        let r = Round::new(RawPoint::new(1.0, 2.0));
        assert_eq!(r.phase, RoundPhase::Idle);
        assert_eq!(r.target, RawPoint::new(1.0, 2.0));
        assert_eq!(r.marker(), None);
        assert!(!r.is_confirmed());
    }

    #[test]
    fn zero_natural_size_is_not_a_loaded_image() {
        assert_eq!(ImageSize::from_natural(0, 0), None);
        assert_eq!(ImageSize::from_natural(1520, 0), None);
        assert_eq!(
            ImageSize::from_natural(1520, 800),
            Some(ImageSize {
                width: 1520,
                height: 800
            })
        );
    }

    #[test]
    fn raw_bounds_cover_the_map_edges() {
        assert!(RawPoint::new(0.0, 0.0).in_bounds());
        assert!(RawPoint::new(RAW_IMAGE_WIDTH, RAW_IMAGE_HEIGHT).in_bounds());
        assert!(!RawPoint::new(900.0, 400.0).in_bounds());
    }
}
