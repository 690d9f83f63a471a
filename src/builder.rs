//! Builder for LRU maps with any policy combination.
//!
//! Every setter returns a builder with a different type parameter, so the
//! final map type is assembled at compile time and unused features cost
//! nothing.
//!
//! ## Example
//!
//! ```rust
//! use lrumap::builder::LruBuilder;
//! use lrumap::policy::{HitCountEnabled, LogFacade, LogOverflow, TimestampAll};
//!
//! let mut map = LruBuilder::new(100)
//!     .timestamping(TimestampAll::new())
//!     .hit_counting::<HitCountEnabled>()
//!     .logging(LogOverflow::<LogFacade>::default())
//!     .build::<u64, String>()
//!     .unwrap();
//!
//! map.insert(1, "hello".to_string());
//! assert_eq!(map.find(&1).map(String::as_str), Some("hello"));
//! assert_eq!(map.core().entry(&1).and_then(|e| e.hit_count()), Some(1));
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::error::LruError;
use crate::lru::{LruCore, LruMap};
use crate::policy::event_log::LogNone;
use crate::policy::hit_count::{HitCountDisabled, HitCounting};
use crate::policy::locking::{LockNone, Locking};
use crate::policy::timestamp::{TimestampNone, Timestamping};

/// Staged configuration for an [`LruMap`].
pub struct LruBuilder<L = LockNone, T = TimestampNone, H = HitCountDisabled, E = LogNone> {
    capacity: usize,
    timestamping: T,
    logging: E,
    _marker: PhantomData<fn() -> (L, H)>,
}

impl LruBuilder {
    /// Starts from the plain configuration: no locking, no timestamps, no hit
    /// counts, no logging.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            timestamping: TimestampNone,
            logging: LogNone,
            _marker: PhantomData,
        }
    }
}

impl<L, T, H, E> LruBuilder<L, T, H, E> {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn locking<L2: Locking>(self) -> LruBuilder<L2, T, H, E> {
        LruBuilder {
            capacity: self.capacity,
            timestamping: self.timestamping,
            logging: self.logging,
            _marker: PhantomData,
        }
    }

    pub fn timestamping<T2: Timestamping>(self, timestamping: T2) -> LruBuilder<L, T2, H, E> {
        LruBuilder {
            capacity: self.capacity,
            timestamping,
            logging: self.logging,
            _marker: PhantomData,
        }
    }

    pub fn hit_counting<H2: HitCounting>(self) -> LruBuilder<L, T, H2, E> {
        LruBuilder {
            capacity: self.capacity,
            timestamping: self.timestamping,
            logging: self.logging,
            _marker: PhantomData,
        }
    }

    pub fn logging<E2>(self, logging: E2) -> LruBuilder<L, T, H, E2> {
        LruBuilder {
            capacity: self.capacity,
            timestamping: self.timestamping,
            logging,
            _marker: PhantomData,
        }
    }
}

impl<L, T, H, E> LruBuilder<L, T, H, E>
where
    L: Locking,
    T: Timestamping,
    H: HitCounting,
{
    /// Builds the map.
    ///
    /// # Errors
    ///
    /// [`LruError::InvalidCapacity`] if the capacity is zero.
    pub fn build<K, V>(self) -> Result<LruMap<K, V, L, T, H, E>, LruError> {
        self.build_core().map(LruMap::from_core)
    }

    /// Builds the bare engine; the locking choice is ignored.
    pub fn build_core<K, V>(self) -> Result<LruCore<K, V, T, H, E>, LruError> {
        LruCore::with_policies(self.capacity, self.timestamping, self.logging)
    }
}

impl<L, T: fmt::Debug, H, E: fmt::Debug> fmt::Debug for LruBuilder<L, T, H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruBuilder")
            .field("capacity", &self.capacity)
            .field("locking", &std::any::type_name::<L>())
            .field("timestamping", &self.timestamping)
            .field("hit_counting", &std::any::type_name::<H>())
            .field("logging", &self.logging)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::policy::event_log::{Event, LogAll};
    use crate::policy::hit_count::HitCountEnabled;
    use crate::policy::timestamp::TimestampAll;

    #[test]
    fn default_builder_builds_plain_map() {
        let mut map = LruBuilder::new(2).build::<u32, u32>().unwrap();
        map.insert(1, 1);
        assert_eq!(map.capacity(), 2);
        assert_eq!(
            std::mem::size_of_val(&map),
            std::mem::size_of::<LruCore<u32, u32>>()
        );
    }

    #[test]
    fn zero_capacity_fails() {
        let err = LruBuilder::new(0).build::<u8, u8>().unwrap_err();
        assert_eq!(err, LruError::InvalidCapacity { capacity: 0 });
        assert!(LruBuilder::new(5)
            .with_capacity(0)
            .build_core::<u8, u8>()
            .is_err());
    }

    #[test]
    fn all_policies_flow_through() {
        let clock = ManualClock::new(40);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let seen = Rc::clone(&seen);
            move |event: Event, rendered: &str| {
                seen.borrow_mut().push(format!("{event}: {rendered}"))
            }
        };
        let mut map = LruBuilder::new(1)
            .timestamping(TimestampAll::with_clock(clock.clone()))
            .hit_counting::<HitCountEnabled>()
            .logging(LogAll::with_sink(sink))
            .build::<u32, &str>()
            .unwrap();

        map.insert(1, "a");
        clock.advance(2);
        map.insert(2, "b");

        assert_eq!(
            *seen.borrow(),
            vec![
                "Insert: 1; a| atime = 0; mtime = 40| hit_count = 0".to_string(),
                "Insert: 2; b| atime = 0; mtime = 42| hit_count = 0".to_string(),
                "Overflow: 1; a| atime = 0; mtime = 40| hit_count = 0".to_string(),
            ]
        );
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn locking_switches_receiver() {
        use crate::policy::locking::LockExclusive;

        let map = LruBuilder::new(3)
            .locking::<LockExclusive>()
            .build::<u32, u32>()
            .unwrap();
        map.insert(1, 2);
        assert_eq!(map.find_cloned(&1), Some(2));
    }

    #[test]
    fn debug_names_policies() {
        let text = format!("{:?}", LruBuilder::new(3).hit_counting::<HitCountEnabled>());
        assert!(text.contains("capacity: 3"));
        assert!(text.contains("HitCountEnabled"));
    }
}
