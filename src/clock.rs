//! Microsecond clock sources consumed by the timestamping policy.
//!
//! The map never reads time directly; [`TimestampAll`](crate::policy::timestamp::TimestampAll)
//! asks its [`Clock`] for the current value. Values must be non-negative and
//! must not decrease between calls made on the same thread.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Source of monotonically non-decreasing microsecond timestamps.
pub trait Clock {
    fn now_usecs(&self) -> i64;
}

/// Wall-clock microseconds since the Unix epoch, advanced by a monotonic
/// [`Instant`] so the reading never goes backwards.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    base_usecs: i64,
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let base_usecs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_micros()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        Self {
            base_usecs,
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now_usecs(&self) -> i64 {
        let elapsed = i64::try_from(self.origin.elapsed().as_micros()).unwrap_or(i64::MAX);
        self.base_usecs.saturating_add(elapsed)
    }
}

/// Manually driven clock. Clones share the same reading.
///
/// # Example
///
/// ```
/// use lrumap::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// let handle = clock.clone();
/// handle.advance(25);
/// assert_eq!(clock.now_usecs(), 125);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_usecs: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_usecs.max(0))),
        }
    }

    /// Moves the clock forward by `usecs`; negative steps are ignored.
    pub fn advance(&self, usecs: i64) {
        if usecs > 0 {
            self.now.fetch_add(usecs, Ordering::Relaxed);
        }
    }

    /// Sets the reading, never moving it backwards.
    pub fn set(&self, usecs: i64) {
        self.now.fetch_max(usecs, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now_usecs(&self) -> i64 {
        self.now.load(Ordering::Relaxed)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_usecs(&self) -> i64 {
        (**self).now_usecs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_non_decreasing() {
        let clock = SystemClock::new();
        let mut prev = clock.now_usecs();
        assert!(prev > 0);
        for _ in 0..1000 {
            let now = clock.now_usecs();
            assert!(now >= prev);
            prev = now;
        }
    }

    #[test]
    fn manual_clock_never_moves_backwards() {
        let clock = ManualClock::new(50);
        clock.advance(-10);
        assert_eq!(clock.now_usecs(), 50);
        clock.set(20);
        assert_eq!(clock.now_usecs(), 50);
        clock.set(70);
        assert_eq!(clock.now_usecs(), 70);
    }

    #[test]
    fn manual_clock_clones_share_reading() {
        let clock = ManualClock::default();
        let other = clock.clone();
        other.advance(3);
        assert_eq!(clock.now_usecs(), 3);
    }
}
