// Per-second countdown driving the landmark screen.

/// How long the landmark photo is shown before the map opens.
pub const LANDMARK_VIEW_MS: u64 = 10_000;
pub const TICK_MS: u64 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownEvent {
    Tick { secs_left: u64 },
    Finished,
    /// Ticks after `Finished` are ignored.
    Expired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    pub remaining_ms: u64,
    pub interval_ms: u64,
    finished: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(LANDMARK_VIEW_MS, TICK_MS)
    }
}

impl Countdown {
    pub fn new(total_ms: u64, interval_ms: u64) -> Self {
        Self {
            remaining_ms: total_ms,
            interval_ms: interval_ms.max(1),
            finished: false,
        }
    }

    pub fn secs_left(&self) -> u64 {
        self.remaining_ms / 1000
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances by one interval. `Finished` is reported exactly once.
    pub fn tick(&mut self) -> CountdownEvent {
        if self.finished {
            return CountdownEvent::Expired;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(self.interval_ms);
        if self.remaining_ms == 0 {
            self.finished = true;
            CountdownEvent::Finished
        } else {
            CountdownEvent::Tick {
                secs_left: self.secs_left(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_seconds_tick_down_then_finish_once() {
        let mut cd = Countdown::default();
        assert_eq!(cd.secs_left(), 10);
        let events: Vec<_> = (0..12).map(|_| cd.tick()).collect();
        let ticks: Vec<_> = (1..=9)
            .rev()
            .map(|s| CountdownEvent::Tick { secs_left: s })
            .collect();
        assert_eq!(&events[..9], &ticks[..]);
        assert_eq!(events[9], CountdownEvent::Finished);
        assert_eq!(events[10], CountdownEvent::Expired);
        assert_eq!(events[11], CountdownEvent::Expired);
        assert!(cd.is_finished());
    }

    #[test]
    fn uneven_total_still_finishes() {
        let mut cd = Countdown::new(2_500, 1_000);
        assert_eq!(cd.tick(), CountdownEvent::Tick { secs_left: 1 });
        assert_eq!(cd.tick(), CountdownEvent::Tick { secs_left: 0 });
        assert_eq!(cd.tick(), CountdownEvent::Finished);
    }
}
