//! The record stored per key.
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────┐
//!   │                Entry<K, V, T, H>                     │
//!   ├──────────────────────┬───────────────────────────────┤
//!   │  key: K              │  cloned into the index        │
//!   │  value: V            │  overwritten in place         │
//!   │  stamps: T::Stamps   │  `()` under TimestampNone     │
//!   │  hits: H::Counter    │  `()` under HitCountDisabled  │
//!   └──────────────────────┴───────────────────────────────┘
//! ```
//!
//! With the "none" policies an entry is exactly as large as its key/value pair.

use std::fmt;
use std::marker::PhantomData;

use crate::policy::hit_count::HitCounting;
use crate::policy::timestamp::Timestamping;

pub struct Entry<K, V, T: Timestamping, H: HitCounting> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) stamps: T::Stamps,
    pub(crate) hits: H::Counter,
    _policies: PhantomData<fn() -> (T, H)>,
}

impl<K, V, T: Timestamping, H: HitCounting> Entry<K, V, T, H> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            stamps: T::Stamps::default(),
            hits: H::Counter::default(),
            _policies: PhantomData,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Timestamp storage; `&()` when timestamps are not recorded.
    pub fn stamps(&self) -> &T::Stamps {
        &self.stamps
    }

    /// Successful finds since insertion, if hit counting is enabled.
    pub fn hit_count(&self) -> Option<u64> {
        H::hits(&self.hits)
    }

    /// Newest timestamp, if timestamps are recorded.
    pub fn recency_usecs(&self) -> Option<i64> {
        T::recency_usecs(&self.stamps)
    }
}

/// Renders as `"<key>; <value>"` followed by the policy fields.
impl<K, V, T, H> fmt::Display for Entry<K, V, T, H>
where
    K: fmt::Display,
    V: fmt::Display,
    T: Timestamping,
    H: HitCounting,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {}", self.key, self.value)?;
        T::fmt_stamps(&self.stamps, f)?;
        H::fmt_counter(&self.hits, f)
    }
}

impl<K, V, T, H> fmt::Debug for Entry<K, V, T, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
    T: Timestamping,
    H: HitCounting,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("stamps", &self.stamps)
            .field("hits", &self.hits)
            .finish()
    }
}
