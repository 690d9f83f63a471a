//! Per-entry access and modify timestamps.
//!
//! | Policy           | Per-entry storage        | `audit`                          |
//! |------------------|--------------------------|----------------------------------|
//! | `TimestampNone`  | `()`                     | always `true`                    |
//! | `TimestampAll`   | [`Timestamps`] (2 × i64) | recency is non-increasing        |
//!
//! `on_modify` fires on every insert (new key or overwrite); `on_access`
//! fires on every successful find. Both run after the entry has been moved
//! to the front, so with `TimestampAll` the front entry always carries the
//! newest reading.

use std::fmt;

use crate::clock::{Clock, SystemClock};

/// Timestamping hooks invoked by the engine.
pub trait Timestamping {
    /// Per-entry storage. `()` for policies that record nothing.
    type Stamps: Default + fmt::Debug;

    fn on_access(&self, stamps: &mut Self::Stamps);

    fn on_modify(&self, stamps: &mut Self::Stamps);

    /// Most recent of the entry's timestamps, if this policy records any.
    fn recency_usecs(stamps: &Self::Stamps) -> Option<i64>;

    /// Returns `true` iff the stamps, walked front to back, never grow more
    /// recent.
    fn audit<'a, I>(&self, stamps: I) -> bool
    where
        I: IntoIterator<Item = &'a Self::Stamps>,
        Self::Stamps: 'a,
    {
        let mut prev = i64::MAX;
        for stamp in stamps {
            let Some(current) = Self::recency_usecs(stamp) else {
                return true;
            };
            if current > prev {
                return false;
            }
            prev = current;
        }
        true
    }

    /// Appends the stamp rendering (empty when nothing is recorded).
    fn fmt_stamps(stamps: &Self::Stamps, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Records nothing; audits always pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampNone;

impl Timestamping for TimestampNone {
    type Stamps = ();

    #[inline(always)]
    fn on_access(&self, _stamps: &mut ()) {}

    #[inline(always)]
    fn on_modify(&self, _stamps: &mut ()) {}

    #[inline(always)]
    fn recency_usecs(_stamps: &()) -> Option<i64> {
        None
    }

    // Nothing to order by, so the list is given the benefit of the doubt.
    #[inline(always)]
    fn audit<'a, I>(&self, _stamps: I) -> bool
    where
        I: IntoIterator<Item = &'a ()>,
    {
        true
    }

    #[inline(always)]
    fn fmt_stamps(_stamps: &(), _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

/// Access and modify timestamps of one entry, in microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamps {
    /// Last successful find.
    pub access_usecs: i64,
    /// Last insert, fresh or overwrite.
    pub modify_usecs: i64,
}

impl Timestamps {
    pub fn access_usecs(&self) -> i64 {
        self.access_usecs
    }

    pub fn modify_usecs(&self) -> i64 {
        self.modify_usecs
    }

    /// The newer of the two timestamps.
    pub fn latest_usecs(&self) -> i64 {
        self.access_usecs.max(self.modify_usecs)
    }
}

/// Stamps every access and modification using clock `C`.
///
/// # Example
///
/// ```
/// use lrumap::clock::ManualClock;
/// use lrumap::policy::timestamp::{TimestampAll, Timestamping, Timestamps};
///
/// let clock = ManualClock::new(10);
/// let policy = TimestampAll::with_clock(clock.clone());
/// let mut stamps = Timestamps::default();
/// policy.on_modify(&mut stamps);
/// clock.advance(5);
/// policy.on_access(&mut stamps);
/// assert_eq!((stamps.modify_usecs, stamps.access_usecs), (10, 15));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimestampAll<C = SystemClock> {
    clock: C,
}

impl TimestampAll<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> TimestampAll<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> Timestamping for TimestampAll<C> {
    type Stamps = Timestamps;

    #[inline]
    fn on_access(&self, stamps: &mut Timestamps) {
        stamps.access_usecs = self.clock.now_usecs();
    }

    #[inline]
    fn on_modify(&self, stamps: &mut Timestamps) {
        stamps.modify_usecs = self.clock.now_usecs();
    }

    #[inline]
    fn recency_usecs(stamps: &Timestamps) -> Option<i64> {
        Some(stamps.latest_usecs())
    }

    fn fmt_stamps(stamps: &Timestamps, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| atime = {}; mtime = {}",
            stamps.access_usecs, stamps.modify_usecs
        )
    }
}
