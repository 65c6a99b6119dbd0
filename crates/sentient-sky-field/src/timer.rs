//! A self-rescheduling timer with a cancellation handle.

use std::cell::Cell;
use std::ops::Range;
use std::rc::Rc;
use std::time::Duration;

use rand::Rng;

/// Delay before the first shooting star.
pub const FIRST_SPAWN: Duration = Duration::from_secs(20);

/// Gap between later shooting stars, in milliseconds.
pub const SPAWN_DELAY_MS: Range<u64> = 18_000..35_000;

/// Shared cancel flag for a [`RepeatingTimer`].
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Fires once at a fixed delay, then again after a random delay drawn from
/// `delay_ms` each time it fires, until cancelled.
///
/// Time is measured as the elapsed duration since the owner started.
#[derive(Debug)]
pub struct RepeatingTimer {
    due: Duration,
    delay_ms: Range<u64>,
    handle: TimerHandle,
}

impl RepeatingTimer {
    pub fn new(first: Duration, delay_ms: Range<u64>) -> Self {
        Self {
            due: first,
            delay_ms,
            handle: TimerHandle::default(),
        }
    }

    /// The timer used for shooting stars.
    pub fn shooting_star() -> Self {
        Self::new(FIRST_SPAWN, SPAWN_DELAY_MS)
    }

    pub fn handle(&self) -> TimerHandle {
        self.handle.clone()
    }

    /// When the timer fires next, or `None` once cancelled.
    pub fn due(&self) -> Option<Duration> {
        (!self.handle.is_cancelled()).then_some(self.due)
    }

    /// Fire if due at `now`, rescheduling relative to `now`.
    pub fn poll<R: Rng>(&mut self, now: Duration, rng: &mut R) -> bool {
        if self.handle.is_cancelled() || now < self.due {
            return false;
        }
        let delay = if self.delay_ms.is_empty() {
            self.delay_ms.start
        } else {
            rng.gen_range(self.delay_ms.clone())
        };
        self.due = now + Duration::from_millis(delay);
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_first_fire_at_twenty_seconds() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut timer = RepeatingTimer::shooting_star();
        assert!(!timer.poll(Duration::from_millis(19_999), &mut rng));
        assert!(timer.poll(Duration::from_secs(20), &mut rng));
        assert!(!timer.poll(Duration::from_secs(20), &mut rng));
    }

    #[test]
    fn test_reschedule_gap_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut timer = RepeatingTimer::shooting_star();
        let mut now = FIRST_SPAWN;
        for _ in 0..100 {
            assert!(timer.poll(now, &mut rng));
            let next = timer.due().unwrap();
            let gap = next - now;
            assert!(gap >= Duration::from_millis(18_000));
            assert!(gap < Duration::from_millis(35_000));
            now = next;
        }
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut timer = RepeatingTimer::shooting_star();
        let handle = timer.handle();
        handle.cancel();
        assert!(timer.handle().is_cancelled());
        assert_eq!(timer.due(), None);
        assert!(!timer.poll(Duration::from_secs(3600), &mut rng));
    }

    #[test]
    fn test_empty_delay_range_uses_start() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut timer = RepeatingTimer::new(Duration::ZERO, 500..500);
        assert!(timer.poll(Duration::from_secs(1), &mut rng));
        assert_eq!(timer.due(), Some(Duration::from_millis(1500)));
    }
}
