//! Unlocked LRU engine: key index + recency list + policy hooks.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                     LruCore<K, V, T, H, E>                       │
//!   │                                                                  │
//!   │   index: FxHashMap<K, SlotId>                                    │
//!   │     ┌─────────┬────────┐                                         │
//!   │     │  key_a  │ id_2 ──┼──────────────┐                          │
//!   │     │  key_b  │ id_1 ──┼───────┐      │                          │
//!   │     └─────────┴────────┘       ▼      ▼                          │
//!   │   list: RecencyList<Entry>  [id_1] ◄──► [id_2] ◄── tail (LRU)    │
//!   │                       head ──► (MRU)                             │
//!   │                                                                  │
//!   │   stats: LruStats       timestamping: T       logging: E         │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation order
//!
//! | Operation | Structural change            | Hooks, in order                              |
//! |-----------|------------------------------|----------------------------------------------|
//! | `insert`  | move/push to front           | `on_modify`, `log_insert`, then on overflow `log_overflow` before the back entry is dropped |
//! | `find`    | move to front                | `on_find_hit`, `log_find`, `on_access`       |
//! | `erase`   | unlink + unindex             | `log_erase` before removal                   |
//!
//! Hooks run after the entry has reached its final position, so a hook that
//! panics leaves the index and the list consistent with each other. A panic
//! in `log_insert` on a full map skips that insert's eviction and leaves the
//! map one entry over capacity; the next insert evicts back down.
//!
//! ## Invariants
//!
//! - `index.len() == list.len() <= capacity`, and `capacity >= 1`.
//! - Every list entry is indexed under its own key at its own `SlotId`.
//! - With `TimestampAll`, recency is non-increasing front to back
//!   ([`valid`](LruCore::valid)).

use std::borrow::Borrow;
use std::fmt::{self, Write as _};
use std::hash::Hash;
use std::mem::size_of;
use std::num::NonZeroUsize;

use rustc_hash::FxHashMap;

use crate::ds::{RecencyList, SlotId};
use crate::entry::Entry;
use crate::error::{InvariantError, LruError};
use crate::policy::event_log::{EventLogging, LogNone};
use crate::policy::hit_count::{HitCountDisabled, HitCounting};
use crate::policy::timestamp::{TimestampNone, Timestamping};
use crate::stats::LruStats;

/// Header line of [`LruCore::render`].
pub const RENDER_HEADER: &str = "key; value| atime; mtime";

// Upper bound on storage reserved up front; larger maps grow on demand.
const PREALLOC_LIMIT: usize = 4096;

/// Single-threaded LRU engine.
///
/// All mutating operations take `&mut self`; a value returned by
/// [`find`](Self::find) therefore cannot outlive the next mutation.
///
/// # Example
///
/// ```
/// use lrumap::LruCore;
///
/// let mut cache: LruCore<u32, &str> = LruCore::try_new(2).unwrap();
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// assert_eq!(cache.find(&1), Some(&"one"));
///
/// // 2 is now least recent and is pushed out.
/// cache.insert(3, "three");
/// assert!(!cache.exists(&2));
/// assert_eq!(cache.stats().num_overflow, 1);
/// ```
pub struct LruCore<
    K,
    V,
    T: Timestamping = TimestampNone,
    H: HitCounting = HitCountDisabled,
    E = LogNone,
> {
    index: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V, T, H>>,
    capacity: NonZeroUsize,
    stats: LruStats,
    timestamping: T,
    logging: E,
}

impl<K, V, T, H, E> LruCore<K, V, T, H, E>
where
    T: Timestamping,
    H: HitCounting,
{
    /// Creates an empty map with default policy instances.
    pub fn try_new(capacity: usize) -> Result<Self, LruError>
    where
        T: Default,
        E: Default,
    {
        Self::with_policies(capacity, T::default(), E::default())
    }

    /// Creates an empty map with the given timestamping and logging policies.
    pub fn with_policies(capacity: usize, timestamping: T, logging: E) -> Result<Self, LruError> {
        let capacity =
            NonZeroUsize::new(capacity).ok_or(LruError::InvalidCapacity { capacity })?;
        let reserve = capacity.get().min(PREALLOC_LIMIT);

        log::debug!(
            target: "lrumap",
            "LruCore sizes: key = {}, value = {}, entry = {}, core = {}, capacity = {}",
            size_of::<K>(),
            size_of::<V>(),
            size_of::<Entry<K, V, T, H>>(),
            size_of::<Self>(),
            capacity
        );

        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            list: RecencyList::with_capacity(reserve),
            capacity,
            stats: LruStats::default(),
            timestamping,
            logging,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Snapshot of the lifetime counters.
    #[inline]
    pub fn stats(&self) -> LruStats {
        self.stats
    }

    pub fn timestamping(&self) -> &T {
        &self.timestamping
    }

    pub fn logging(&self) -> &E {
        &self.logging
    }

    /// Entries from most to least recent.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Entry<K, V, T, H>> + '_ {
        self.list.iter()
    }

    /// Keys from most to least recent.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(Entry::key)
    }

    /// Most recently used entry.
    pub fn front(&self) -> Option<&Entry<K, V, T, H>> {
        self.list.front()
    }

    /// Least recently used entry; the next to be pushed out.
    pub fn back(&self) -> Option<&Entry<K, V, T, H>> {
        self.list.back()
    }

    /// Audits recency ordering through the timestamping policy.
    ///
    /// Always `true` under `TimestampNone`.
    pub fn valid(&self) -> bool {
        self.timestamping
            .audit(self.list.iter().map(|entry| &entry.stamps))
    }

    /// Approximate heap footprint of the index and list, in bytes.
    pub fn approx_bytes(&self) -> usize {
        self.list.approx_bytes()
            + self.index.capacity() * (size_of::<K>() + size_of::<SlotId>() + 1)
    }
}

impl<K, V, T, H, E> LruCore<K, V, T, H, E>
where
    K: Eq + Hash + Clone,
    T: Timestamping,
    H: HitCounting,
    E: EventLogging<K, V>,
{
    /// Inserts `key`, or overwrites its value, and makes it most recent.
    ///
    /// When a new key pushes the map past capacity, the least recent entry
    /// is removed.
    pub fn insert(&mut self, key: K, value: V) {
        let id = match self.index.get(&key) {
            Some(&id) => {
                self.list.move_to_front(id);
                if let Some(entry) = self.list.get_mut(id) {
                    entry.value = value;
                }
                id
            },
            None => {
                let id = self.list.push_front(Entry::new(key.clone(), value));
                self.index.insert(key, id);
                id
            },
        };

        if let Some(entry) = self.list.get_mut(id) {
            self.timestamping.on_modify(&mut entry.stamps);
            self.logging.log_insert(&*entry);
        }

        // A hook that panicked during an earlier insert can leave more than
        // one surplus entry behind.
        while self.list.len() > self.capacity.get() {
            self.evict_back();
        }

        self.stats.num_insert += 1;
        self.debug_check_sizes();
    }

    /// Looks up `key`, makes it most recent, and returns its value.
    ///
    /// Counts toward `num_find` (and `num_find_ok` on a hit).
    pub fn find<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_value_mut(key).map(|value| &*value)
    }

    /// Copies the value out; see [`find`](Self::find).
    pub fn find_cloned<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.find(key).cloned()
    }

    // Shared by `find` and the locked facade, which maps a guard onto the value.
    pub(crate) fn find_value_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stats.num_find += 1;

        let id = *self.index.get(key)?;
        self.list.move_to_front(id);
        self.stats.num_find_ok += 1;

        let entry = self.list.get_mut(id)?;
        H::on_find_hit(&mut entry.hits);
        self.logging.log_find(&*entry);
        self.timestamping.on_access(&mut entry.stamps);
        Some(&mut entry.value)
    }

    /// Returns `true` if `key` is present. Touches neither recency nor stats.
    #[inline]
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Reads a value without touching recency, hooks, or stats.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entry(key).map(Entry::value)
    }

    /// Reads an entry with its policy metadata; no side effects.
    pub fn entry<Q>(&self, key: &Q) -> Option<&Entry<K, V, T, H>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.list.get(id)
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// Counts toward `num_erase` whether or not the key exists.
    pub fn erase<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stats.num_erase += 1;

        let id = *self.index.get(key)?;
        if let Some(entry) = self.list.get(id) {
            self.logging.log_erase(entry);
        }
        self.index.remove(key);
        let removed = self.list.remove(id).map(|entry| entry.value);

        self.debug_check_sizes();
        removed
    }

    /// Drops every entry and releases their storage. Capacity and stats are
    /// kept; `num_clear` is incremented.
    pub fn clear(&mut self) {
        self.list.clear_shrink();
        self.index.clear();
        self.index.shrink_to_fit();
        self.stats.num_clear += 1;
    }

    /// Position of `key` in recency order (0 = most recent). O(n).
    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let target = *self.index.get(key)?;
        self.list.iter_ids().position(|id| id == target)
    }

    /// Checks that the index and the recency list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_links()?;

        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.capacity.get() {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        for (rank, id) in self.list.iter_ids().enumerate() {
            let indexed = self
                .list
                .get(id)
                .and_then(|entry| self.index.get(&entry.key).copied());
            if indexed != Some(id) {
                return Err(InvariantError::new(format!(
                    "entry at rank {} is not indexed at its own slot",
                    rank
                )));
            }
        }
        Ok(())
    }

    fn evict_back(&mut self) {
        let Some(id) = self.list.back_id() else {
            return;
        };
        if let Some(entry) = self.list.get(id) {
            self.logging.log_overflow(entry);
        }
        if let Some(entry) = self.list.remove(id) {
            self.index.remove(&entry.key);
        }
        self.stats.num_overflow += 1;
    }

    #[inline(always)]
    fn debug_check_sizes(&self) {
        debug_assert_eq!(self.index.len(), self.list.len());
        debug_assert!(self.list.len() <= self.capacity.get());
    }

    #[cfg(test)]
    pub(crate) fn stamps_mut(&mut self, key: &K) -> Option<&mut T::Stamps> {
        let id = *self.index.get(key)?;
        self.list.get_mut(id).map(|entry| &mut entry.stamps)
    }
}

impl<K, V, T, H, E> LruCore<K, V, T, H, E>
where
    K: fmt::Display,
    V: fmt::Display,
    T: Timestamping,
    H: HitCounting,
{
    /// Human-readable dump: header, one line per entry front to back, then a
    /// blank line.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.list.len() * 32 + RENDER_HEADER.len() + 2);
        out.push_str(RENDER_HEADER);
        out.push('\n');
        for entry in self.list.iter() {
            let _ = writeln!(out, "{}", entry);
        }
        out.push('\n');
        out
    }
}

impl<K, V, T, H, E> fmt::Debug for LruCore<K, V, T, H, E>
where
    T: Timestamping,
    H: HitCounting,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<K, V, T, H, E> Extend<(K, V)> for LruCore<K, V, T, H, E>
where
    K: Eq + Hash + Clone,
    T: Timestamping,
    H: HitCounting,
    E: EventLogging<K, V>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::policy::event_log::{Event, LogAll, LogOverflow};
    use crate::policy::hit_count::HitCountEnabled;
    use crate::policy::timestamp::{TimestampAll, Timestamps};

    type Plain = LruCore<i32, i32>;
    type Stamped = LruCore<i32, i32, TimestampAll<ManualClock>, HitCountEnabled>;

    fn value_of(key: i32) -> i32 {
        5 * key
    }

    fn keys(cache: &LruCore<i32, i32, impl Timestamping, impl HitCounting, impl Sized>) -> Vec<i32> {
        cache.list.iter().map(|e| e.key).collect()
    }

    fn filled(capacity: usize) -> Plain {
        let mut cache = Plain::try_new(capacity).unwrap();
        for k in 0..capacity as i32 {
            cache.insert(k, value_of(k));
        }
        cache
    }

    fn stamped(clock: &ManualClock) -> Stamped {
        Stamped::with_policies(4, TimestampAll::with_clock(clock.clone()), LogNone).unwrap()
    }

    type EventLog = Rc<RefCell<Vec<(Event, String)>>>;

    fn recorder(log: &EventLog) -> impl Fn(Event, &str) {
        let log = Rc::clone(log);
        move |event, rendered| log.borrow_mut().push((event, rendered.to_string()))
    }

    mod construction {
        use super::*;

        #[test]
        fn zero_capacity_is_rejected() {
            assert_eq!(
                Plain::try_new(0).unwrap_err(),
                LruError::InvalidCapacity { capacity: 0 }
            );
        }

        #[test]
        fn new_map_is_empty_and_valid() {
            let cache = Plain::try_new(4).unwrap();
            assert_eq!(cache.capacity(), 4);
            assert_eq!(cache.len(), 0);
            assert!(cache.is_empty());
            assert!(cache.valid());
            assert_eq!(cache.stats(), LruStats::default());
            assert!(cache.check_invariants().is_ok());
        }

        #[test]
        fn huge_capacity_does_not_preallocate_everything() {
            let cache = Plain::try_new(usize::MAX).unwrap();
            assert_eq!(cache.capacity(), usize::MAX);
            assert!(cache.approx_bytes() < 1 << 20);
        }
    }

    mod basic_behavior {
        use super::*;

        #[test]
        fn fill_and_lookup() {
            let mut cache = filled(4);
            assert_eq!(cache.len(), 4);
            for k in 0..4 {
                assert_eq!(cache.find(&k), Some(&value_of(k)));
            }
            assert_eq!(keys(&cache), vec![3, 2, 1, 0]);
        }

        #[test]
        fn find_miss_counts_but_does_not_reorder() {
            let mut cache = filled(3);
            assert_eq!(cache.find(&42), None);
            assert_eq!(keys(&cache), vec![2, 1, 0]);
            let stats = cache.stats();
            assert_eq!((stats.num_find, stats.num_find_ok), (1, 0));
        }

        #[test]
        fn eviction_removes_least_recent() {
            let mut cache = filled(4);
            for k in 0..4 {
                cache.find(&k);
            }
            assert_eq!(keys(&cache), vec![3, 2, 1, 0]);
            cache.find(&0);
            assert_eq!(keys(&cache), vec![0, 3, 2, 1]);

            cache.insert(4, value_of(4));
            assert!(!cache.exists(&1));
            assert_eq!(cache.len(), 4);
            assert_eq!(cache.stats().num_overflow, 1);
            assert_eq!(keys(&cache), vec![4, 0, 3, 2]);
        }

        #[test]
        fn overwrite_refreshes_recency_without_overflow() {
            let mut cache = filled(4);
            cache.insert(0, 999);
            assert_eq!(cache.front().map(Entry::key), Some(&0));
            assert_eq!(cache.find(&0), Some(&999));
            assert_eq!(cache.len(), 4);
            assert_eq!(cache.stats().num_overflow, 0);
            assert_eq!(cache.stats().num_insert, 5);
        }

        #[test]
        fn find_erase_find() {
            let mut cache = filled(4);
            assert_eq!(cache.find(&3), Some(&15));
            assert_eq!(cache.erase(&3), Some(15));
            assert_eq!(cache.find(&3), None);
            assert_eq!(cache.len(), 3);
            assert!(cache.check_invariants().is_ok());
        }

        #[test]
        fn erase_missing_only_counts() {
            let mut cache = filled(2);
            assert_eq!(cache.erase(&7), None);
            assert_eq!(cache.erase(&7), None);
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.stats().num_erase, 2);
        }

        #[test]
        fn exists_and_peek_have_no_side_effects() {
            let mut cache = filled(3);
            assert!(cache.exists(&0));
            assert_eq!(cache.peek(&0), Some(&0));
            assert_eq!(keys(&cache), vec![2, 1, 0]);
            assert_eq!(cache.stats().num_find, 0);
            assert_eq!(cache.back().map(Entry::key), Some(&0));
            cache.insert(3, 15);
            assert!(!cache.exists(&0));
        }

        #[test]
        fn clear_keeps_capacity_and_stats() {
            let mut cache = Plain::try_new(4).unwrap();
            for k in 0..10 {
                cache.insert(k, value_of(k));
            }
            cache.clear();
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.capacity(), 4);
            let stats = cache.stats();
            assert_eq!(stats.num_insert, 10);
            assert_eq!(stats.num_overflow, 6);
            assert_eq!(stats.num_clear, 1);
            assert!((0..10).all(|k| !cache.exists(&k)));

            cache.insert(1, 5);
            assert_eq!(cache.find(&1), Some(&5));
        }

        #[test]
        fn capacity_one_keeps_latest() {
            let mut cache = Plain::try_new(1).unwrap();
            cache.insert(1, 1);
            cache.insert(2, 2);
            cache.insert(2, 3);
            assert_eq!(keys(&cache), vec![2]);
            assert_eq!(cache.find(&2), Some(&3));
            assert_eq!(cache.stats().num_overflow, 1);
        }

        #[test]
        fn recency_rank_tracks_moves() {
            let mut cache = filled(4);
            assert_eq!(cache.recency_rank(&3), Some(0));
            assert_eq!(cache.recency_rank(&0), Some(3));
            cache.find(&0);
            assert_eq!(cache.recency_rank(&0), Some(0));
            assert_eq!(cache.recency_rank(&3), Some(1));
            assert_eq!(cache.recency_rank(&9), None);
        }

        #[test]
        fn borrowed_key_lookup() {
            let mut cache: LruCore<String, u32> = LruCore::try_new(2).unwrap();
            cache.insert("alpha".to_string(), 1);
            assert!(cache.exists("alpha"));
            assert_eq!(cache.find("alpha"), Some(&1));
            assert_eq!(cache.find_cloned("alpha"), Some(1));
            assert_eq!(cache.erase("alpha"), Some(1));
        }

        #[test]
        fn extend_inserts_in_order() {
            let mut cache = Plain::try_new(3).unwrap();
            cache.extend((0..5).map(|k| (k, value_of(k))));
            assert_eq!(keys(&cache), vec![4, 3, 2]);
            assert_eq!(cache.stats().num_insert, 5);
        }
    }

    mod timestamps {
        use super::*;

        #[test]
        fn insert_sets_modify_find_sets_access() {
            let clock = ManualClock::new(100);
            let mut cache = stamped(&clock);
            cache.insert(1, 5);
            clock.advance(10);
            cache.find(&1);
            let stamps = *cache.entry(&1).unwrap().stamps();
            assert_eq!(
                stamps,
                Timestamps {
                    access_usecs: 110,
                    modify_usecs: 100
                }
            );
        }

        #[test]
        fn valid_after_every_operation() {
            let clock = ManualClock::new(1);
            let mut cache = stamped(&clock);
            for step in 0..40 {
                clock.advance(1);
                match step % 4 {
                    0 | 1 => cache.insert(step % 7, step),
                    2 => {
                        cache.find(&(step % 5));
                    },
                    _ => {
                        cache.erase(&(step % 6));
                    },
                }
                assert!(cache.valid(), "invalid after step {}", step);
            }
        }

        #[test]
        fn audit_catches_tampering() {
            let clock = ManualClock::new(1);
            let mut cache = stamped(&clock);
            cache.insert(0, 0);
            clock.advance(5);
            cache.insert(1, 5);
            assert!(cache.valid());

            // Push the older entry's timestamps past the front entry's.
            let tampered = cache.stamps_mut(&0).unwrap();
            tampered.access_usecs = 1_000;
            tampered.modify_usecs = 1_000;
            assert!(!cache.valid());
        }

        #[test]
        fn hit_count_increments_on_find_only() {
            let clock = ManualClock::default();
            let mut cache = stamped(&clock);
            cache.insert(3, 15);
            cache.insert(3, 16);
            cache.find(&3);
            cache.find(&3);
            cache.find(&4);
            assert_eq!(cache.entry(&3).and_then(Entry::hit_count), Some(2));
        }
    }

    mod logging {
        use super::*;

        #[test]
        fn log_all_records_every_event_in_order() {
            let log = EventLog::default();
            let mut cache: LruCore<i32, i32, TimestampNone, HitCountDisabled, _> =
                LruCore::with_policies(2, TimestampNone, LogAll::with_sink(recorder(&log)))
                    .unwrap();
            cache.insert(1, 5);
            cache.insert(2, 10);
            cache.find(&1);
            cache.insert(3, 15);
            cache.erase(&1);
            cache.erase(&1);
            cache.find(&9);

            let events: Vec<_> = RefCell::borrow(&log)
                .iter()
                .map(|(e, r)| format!("{e}: {r}"))
                .collect();
            assert_eq!(
                events,
                vec![
                    "Insert: 1; 5",
                    "Insert: 2; 10",
                    "Find: 1; 5",
                    "Insert: 3; 15",
                    "Overflow: 2; 10",
                    "Erase: 1; 5",
                ]
            );
        }

        #[test]
        fn log_overflow_records_evictions_only() {
            let log = EventLog::default();
            let mut cache: LruCore<i32, i32, TimestampNone, HitCountDisabled, _> =
                LruCore::with_policies(2, TimestampNone, LogOverflow::with_sink(recorder(&log)))
                    .unwrap();
            for k in 0..4 {
                cache.insert(k, value_of(k));
            }
            cache.find(&3);
            cache.erase(&3);
            let evicted: Vec<_> = RefCell::borrow(&log).iter().map(|(_, r)| r.clone()).collect();
            assert_eq!(evicted, vec!["0; 0", "1; 5"]);
        }

        #[test]
        fn logged_insert_sees_fresh_modify_time() {
            let log = EventLog::default();
            let clock = ManualClock::new(77);
            let mut cache: LruCore<i32, i32, _, HitCountEnabled, _> = LruCore::with_policies(
                2,
                TimestampAll::with_clock(clock.clone()),
                LogAll::with_sink(recorder(&log)),
            )
            .unwrap();
            cache.insert(1, 5);
            clock.advance(3);
            cache.find(&1);
            let records = RefCell::borrow(&log);
            assert_eq!(records[0].1, "1; 5| atime = 0; mtime = 77| hit_count = 0");
            // Hit count is bumped before logging; access time after.
            assert_eq!(records[1].1, "1; 5| atime = 0; mtime = 77| hit_count = 1");
            assert_eq!(cache.entry(&1).unwrap().stamps().access_usecs, 80);
        }
    }

    mod panicking_sink {
        use std::cell::Cell;
        use std::panic::{catch_unwind, AssertUnwindSafe};

        use super::*;

        #[test]
        fn next_insert_recovers_capacity_after_insert_hook_panics() {
            let armed = Rc::new(Cell::new(false));
            let sink = {
                let armed = Rc::clone(&armed);
                move |event: Event, _: &str| {
                    if armed.get() && event == Event::Insert {
                        panic!("sink rejected insert");
                    }
                }
            };
            let mut cache: LruCore<i32, i32, TimestampNone, HitCountDisabled, _> =
                LruCore::with_policies(2, TimestampNone, LogAll::with_sink(sink)).unwrap();
            cache.insert(1, 5);
            cache.insert(2, 10);

            armed.set(true);
            let outcome = catch_unwind(AssertUnwindSafe(|| cache.insert(3, 15)));
            assert!(outcome.is_err());
            assert_eq!(cache.len(), 3);
            assert!(cache.list.check_links().is_ok());

            armed.set(false);
            cache.insert(4, 20);
            assert_eq!(cache.len(), 2);
            assert_eq!(keys(&cache), vec![4, 3]);
            assert!(cache.check_invariants().is_ok());
            assert_eq!(cache.stats().num_overflow, 2);
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn render_empty() {
            let cache = Plain::try_new(2).unwrap();
            assert_eq!(cache.render(), "key; value| atime; mtime\n\n");
        }

        #[test]
        fn render_front_to_back_with_policies() {
            let clock = ManualClock::new(5);
            let mut cache = stamped(&clock);
            cache.insert(1, 5);
            clock.advance(1);
            cache.insert(2, 10);
            cache.find(&2);
            assert_eq!(
                cache.render(),
                "key; value| atime; mtime\n\
                 2; 10| atime = 6; mtime = 6| hit_count = 1\n\
                 1; 5| atime = 0; mtime = 5| hit_count = 0\n\n"
            );
        }

        #[test]
        fn debug_is_compact() {
            let cache = filled(2);
            let dbg = format!("{:?}", cache);
            assert!(dbg.starts_with("LruCore"));
            assert!(dbg.contains("len: 2"));
        }
    }

    mod zero_overhead {
        use super::*;

        #[test]
        fn none_policies_are_zero_sized() {
            assert_eq!(size_of::<TimestampNone>(), 0);
            assert_eq!(size_of::<LogNone>(), 0);
            assert_eq!(
                size_of::<Entry<i32, i32, TimestampNone, HitCountDisabled>>(),
                size_of::<(i32, i32)>()
            );
        }
    }
}
