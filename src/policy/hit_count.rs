//! Per-entry hit counters.

use std::fmt;

/// Hit-counting hooks. Policies are stateless markers; only the per-entry
/// counter carries data.
pub trait HitCounting {
    type Counter: Default + fmt::Debug;

    /// Called once per successful find, after the entry moved to the front.
    fn on_find_hit(counter: &mut Self::Counter);

    /// Current count, or `None` when counting is disabled.
    fn hits(counter: &Self::Counter) -> Option<u64>;

    fn fmt_counter(counter: &Self::Counter, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitCountDisabled;

impl HitCounting for HitCountDisabled {
    type Counter = ();

    #[inline(always)]
    fn on_find_hit(_counter: &mut ()) {}

    #[inline(always)]
    fn hits(_counter: &()) -> Option<u64> {
        None
    }

    #[inline(always)]
    fn fmt_counter(_counter: &(), _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitCountEnabled;

impl HitCounting for HitCountEnabled {
    type Counter = u64;

    #[inline]
    fn on_find_hit(counter: &mut u64) {
        *counter = counter.saturating_add(1);
    }

    #[inline]
    fn hits(counter: &u64) -> Option<u64> {
        Some(*counter)
    }

    fn fmt_counter(counter: &u64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "| hit_count = {}", counter)
    }
}
