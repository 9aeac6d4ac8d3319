// Tap-vs-pan discrimination for a single contact, plus pinch tracking.
//
// A contact starts as a tap. It becomes a pan the first time any observed
// position (move, second pointer, release) lies more than MOVE_THRESHOLD px
// from the initial contact on either axis. Once a pan, always a pan.

/// Movement allowed before a press stops counting as a tap.
pub const MOVE_THRESHOLD: f64 = 10.0;

pub fn exceeds_threshold(x0: f64, y0: f64, x: f64, y: f64) -> bool {
    (x - x0).abs().max((y - y0).abs()) > MOVE_THRESHOLD
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchOutcome {
    /// No contact in progress.
    None,
    /// Still within the tap threshold.
    Tap,
    /// Crossed the threshold on this event; a placed marker must be cleared.
    PanStarted { dx: f64, dy: f64 },
    /// Continuing an established pan.
    Panning { dx: f64, dy: f64 },
}

impl TouchOutcome {
    pub fn is_pan(&self) -> bool {
        matches!(self, Self::PanStarted { .. } | Self::Panning { .. })
    }
}

#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub single_active: bool,
    pub panning: bool,
    pub pinch: bool,
    pub last_pinch_dist: f64,
    pub initial_x: f64,
    pub initial_y: f64,
    pub last_touch_x: f64,
    pub last_touch_y: f64,
}

impl TouchState {
    pub fn press(&mut self, x: f64, y: f64) {
        *self = Self {
            single_active: true,
            initial_x: x,
            initial_y: y,
            last_touch_x: x,
            last_touch_y: y,
            ..Self::default()
        };
    }

    pub fn track(&mut self, x: f64, y: f64) -> TouchOutcome {
        if !self.single_active {
            return TouchOutcome::None;
        }
        let dx = x - self.last_touch_x;
        let dy = y - self.last_touch_y;
        if self.panning {
            self.last_touch_x = x;
            self.last_touch_y = y;
            return TouchOutcome::Panning { dx, dy };
        }
        if exceeds_threshold(self.initial_x, self.initial_y, x, y) {
            self.panning = true;
            self.last_touch_x = x;
            self.last_touch_y = y;
            return TouchOutcome::PanStarted { dx, dy };
        }
        TouchOutcome::Tap
    }

    /// A second finger always turns the contact into a zoom gesture, also
    /// when both fingers land together and no single contact was pressed.
    pub fn pinch_start(&mut self, dist: f64) -> TouchOutcome {
        self.pinch = true;
        self.last_pinch_dist = dist.max(1.0);
        self.single_active = true;
        if self.panning {
            TouchOutcome::Panning { dx: 0.0, dy: 0.0 }
        } else {
            self.panning = true;
            TouchOutcome::PanStarted { dx: 0.0, dy: 0.0 }
        }
    }

    /// Zoom factor since the previous pinch sample.
    pub fn pinch_factor(&mut self, dist: f64) -> f64 {
        if !self.pinch {
            return 1.0;
        }
        let dist = dist.max(1.0);
        let factor = dist / self.last_pinch_dist;
        self.last_pinch_dist = dist;
        factor
    }

    /// One finger of a pinch lifted; keep panning from the remaining one.
    pub fn pinch_end(&mut self, x: f64, y: f64) {
        self.pinch = false;
        self.last_touch_x = x;
        self.last_touch_y = y;
    }

    /// Ends the contact. The release position is checked like any move, so a
    /// press that jumps past the threshold between samples is still a pan.
    pub fn release(&mut self, x: f64, y: f64) -> TouchOutcome {
        let outcome = self.track(x, y);
        *self = Self::default();
        outcome
    }

    /// Ends the contact without a final position (touchcancel, pointer lost).
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_wiggle_stays_a_tap() {
        let mut ts = TouchState::default();
        ts.press(100.0, 100.0);
        assert_eq!(ts.track(105.0, 95.0), TouchOutcome::Tap);
        assert_eq!(ts.track(110.0, 90.0), TouchOutcome::Tap);
        assert_eq!(ts.release(100.0, 100.0), TouchOutcome::Tap);
    }

    #[test]
    fn crossing_threshold_on_either_axis_is_a_pan() {
        let mut ts = TouchState::default();
        ts.press(100.0, 100.0);
        assert_eq!(
            ts.track(100.0, 110.5),
            TouchOutcome::PanStarted { dx: 0.0, dy: 10.5 }
        );
        assert_eq!(ts.track(101.0, 112.5), TouchOutcome::Panning { dx: 1.0, dy: 2.0 });

        ts.press(0.0, 0.0);
        assert!(ts.track(-11.0, 0.0).is_pan());
    }

    #[test]
    fn returning_inside_threshold_does_not_restore_tap() {
        let mut ts = TouchState::default();
        ts.press(0.0, 0.0);
        assert!(ts.track(20.0, 0.0).is_pan());
        assert!(ts.track(0.0, 0.0).is_pan());
        assert!(ts.release(0.0, 0.0).is_pan());
    }

    #[test]
    fn tap_release_without_moves_is_a_tap() {
        let mut ts = TouchState::default();
        ts.press(42.0, 42.0);
        assert_eq!(ts.release(42.0, 42.0), TouchOutcome::Tap);
        assert!(!ts.single_active);
    }

    #[test]
    fn release_far_from_press_is_a_pan() {
        let mut ts = TouchState::default();
        ts.press(42.0, 42.0);
        assert!(matches!(ts.release(80.0, 42.0), TouchOutcome::PanStarted { .. }));
    }

    #[test]
    fn second_pointer_starts_pan_and_tracks_pinch() {
        let mut ts = TouchState::default();
        ts.press(0.0, 0.0);
        assert!(matches!(ts.pinch_start(100.0), TouchOutcome::PanStarted { .. }));
        assert_eq!(ts.pinch_factor(150.0), 1.5);
        assert_eq!(ts.pinch_factor(75.0), 0.5);

        ts.pinch_end(30.0, 40.0);
        assert_eq!(ts.pinch_factor(10.0), 1.0);
        assert_eq!(ts.track(31.0, 40.0), TouchOutcome::Panning { dx: 1.0, dy: 0.0 });
    }

    #[test]
    fn pinch_without_prior_press_is_a_pan() {
        let mut ts = TouchState::default();
        ts.press(10.0, 10.0);
        assert_eq!(ts.release(10.0, 10.0), TouchOutcome::Tap);

        assert_eq!(
            ts.pinch_start(120.0),
            TouchOutcome::PanStarted { dx: 0.0, dy: 0.0 }
        );
        assert_eq!(ts.pinch_factor(240.0), 2.0);
        assert_eq!(
            ts.pinch_start(240.0),
            TouchOutcome::Panning { dx: 0.0, dy: 0.0 }
        );

        ts.pinch_end(50.0, 50.0);
        assert_eq!(ts.track(52.0, 50.0), TouchOutcome::Panning { dx: 2.0, dy: 0.0 });
        assert!(ts.release(52.0, 50.0).is_pan());
    }

    #[test]
    fn no_contact_reports_none() {
        let mut ts = TouchState::default();
        assert_eq!(ts.track(5.0, 5.0), TouchOutcome::None);
        assert_eq!(ts.pinch_factor(10.0), 1.0);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(!exceeds_threshold(0.0, 0.0, 10.0, -10.0));
        assert!(exceeds_threshold(0.0, 0.0, 10.01, 0.0));
    }
}
