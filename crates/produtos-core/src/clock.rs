//! Time source for record timestamps.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current time in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic runs.
///
/// Every call to `now` returns the current instant and then moves the clock
/// forward by `step`, so consecutive stamps are strictly increasing unless
/// the step is zero.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl ManualClock {
    /// Start at `start`, advancing one second per reading.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_step(start, Duration::seconds(1))
    }

    /// Start at `start`, advancing `step` per reading.
    pub fn with_step(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            current: Mutex::new(start),
            step,
        }
    }

    /// Move the clock forward without reading it.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock();
        *current += by;
    }

    /// The instant the next `now` call will return.
    pub fn peek(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock();
        let now = *current;
        *current += self.step;
        now
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_manual_clock_steps_forward() {
        let clock = ManualClock::new(start());
        let first = clock.now();
        let second = clock.now();

        assert_eq!(first, start());
        assert_eq!(second - first, Duration::seconds(1));
    }

    #[test]
    fn test_manual_clock_zero_step_is_frozen() {
        let clock = ManualClock::with_step(start(), Duration::zero());
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(start());
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.peek(), start() + Duration::minutes(5));
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
