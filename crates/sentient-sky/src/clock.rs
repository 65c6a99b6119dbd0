//! Fixed-rate frame scheduling.

use std::time::{Duration, Instant};

/// Decides when the next frame is due.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    start: Instant,
    next_frame: Instant,
    frames: u64,
}

impl FrameClock {
    /// A clock whose first frame is due immediately.
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            start,
            next_frame: start,
            frames: 0,
        }
    }

    /// Time since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// How long to wait for input before the next frame is due.
    pub fn timeout(&self) -> Duration {
        self.timeout_at(Instant::now())
    }

    pub fn timeout_at(&self, now: Instant) -> Duration {
        self.next_frame.saturating_duration_since(now)
    }

    /// Whether a frame is due; consumes it if so.
    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }

    /// Missed frames are dropped rather than replayed in a burst.
    pub fn ready_at(&mut self, now: Instant) -> bool {
        if now < self.next_frame {
            return false;
        }
        self.next_frame += self.interval;
        if self.next_frame <= now {
            self.next_frame = now + self.interval;
        }
        self.frames += 1;
        true
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_first_frame_is_immediate() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(FRAME, start);
        assert_eq!(clock.timeout_at(start), Duration::ZERO);
        assert!(clock.ready_at(start));
        assert!(!clock.ready_at(start));
        assert_eq!(clock.timeout_at(start), FRAME);
    }

    #[test]
    fn test_steady_cadence() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(FRAME, start);
        assert!(clock.ready_at(start));
        assert!(!clock.ready_at(start + Duration::from_millis(15)));
        assert!(clock.ready_at(start + Duration::from_millis(17)));
        assert_eq!(
            clock.timeout_at(start + Duration::from_millis(17)),
            Duration::from_millis(15)
        );
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_stall_does_not_burst() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(FRAME, start);
        assert!(clock.ready_at(start));
        let late = start + Duration::from_secs(1);
        assert!(clock.ready_at(late));
        assert!(!clock.ready_at(late));
        assert_eq!(clock.timeout_at(late), FRAME);
    }
}
