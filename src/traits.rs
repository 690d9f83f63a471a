//! # Cache Trait View
//!
//! Policy-agnostic traits over the single-threaded LRU forms, so generic code
//! can drive an [`LruCore`] or an unlocked [`LruMap`] without naming the
//! policy parameters.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V)                     │
//!   │  find(&mut, &K) → Option<&V>            │
//!   │  exists(&, &K) → bool                   │
//!   │  erase(&mut, &K) → Option<V>            │
//!   │  len / is_empty / capacity / clear      │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          RecencyCache<K, V>             │
//!   │                                         │
//!   │  front_key(&) → Option<&K>   (MRU)      │
//!   │  back_key(&) → Option<&K>    (LRU)      │
//!   │  recency_rank(&, &K) → Option<usize>    │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! The locked form takes `&self` and hands out guards, so it does not fit
//! these `&mut self` signatures; it is marked with [`ConcurrentCache`]
//! instead.

use std::hash::Hash;

use crate::entry::Entry;
use crate::lru::{LruCore, LruMap};
use crate::policy::event_log::EventLogging;
use crate::policy::hit_count::HitCounting;
use crate::policy::locking::LockNone;
use crate::policy::timestamp::Timestamping;

/// Operations every bounded map supports.
pub trait CoreCache<K, V> {
    /// Inserts or overwrites; may push out the least recent entry.
    fn insert(&mut self, key: K, value: V);

    /// Looks up `key`, refreshing its recency.
    fn find(&mut self, key: &K) -> Option<&V>;

    /// Presence check with no side effects.
    fn exists(&self, key: &K) -> bool;

    fn erase(&mut self, key: &K) -> Option<V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Read-only access to recency order.
pub trait RecencyCache<K, V>: CoreCache<K, V> {
    /// Most recently used key.
    fn front_key(&self) -> Option<&K>;

    /// Least recently used key; the next to be pushed out.
    fn back_key(&self) -> Option<&K>;

    /// 0 = most recent.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for maps that are safe to share across threads.
pub trait ConcurrentCache: Send + Sync {}

#[cfg(feature = "concurrency")]
impl<K, V, T, H, E> ConcurrentCache
    for LruMap<K, V, crate::policy::locking::LockExclusive, T, H, E>
where
    K: Send,
    V: Send,
    T: Timestamping + Send,
    T::Stamps: Send,
    H: HitCounting,
    H::Counter: Send,
    E: Send,
{
}

impl<K, V, T, H, E> CoreCache<K, V> for LruCore<K, V, T, H, E>
where
    K: Eq + Hash + Clone,
    T: Timestamping,
    H: HitCounting,
    E: EventLogging<K, V>,
{
    fn insert(&mut self, key: K, value: V) {
        LruCore::insert(self, key, value)
    }

    fn find(&mut self, key: &K) -> Option<&V> {
        LruCore::find(self, key)
    }

    fn exists(&self, key: &K) -> bool {
        LruCore::exists(self, key)
    }

    fn erase(&mut self, key: &K) -> Option<V> {
        LruCore::erase(self, key)
    }

    fn len(&self) -> usize {
        LruCore::len(self)
    }

    fn capacity(&self) -> usize {
        LruCore::capacity(self)
    }

    fn clear(&mut self) {
        LruCore::clear(self)
    }
}

impl<K, V, T, H, E> RecencyCache<K, V> for LruCore<K, V, T, H, E>
where
    K: Eq + Hash + Clone,
    T: Timestamping,
    H: HitCounting,
    E: EventLogging<K, V>,
{
    fn front_key(&self) -> Option<&K> {
        self.front().map(Entry::key)
    }

    fn back_key(&self) -> Option<&K> {
        self.back().map(Entry::key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCore::recency_rank(self, key)
    }
}

impl<K, V, T, H, E> CoreCache<K, V> for LruMap<K, V, LockNone, T, H, E>
where
    K: Eq + Hash + Clone,
    T: Timestamping,
    H: HitCounting,
    E: EventLogging<K, V>,
{
    fn insert(&mut self, key: K, value: V) {
        CoreCache::insert(self.core_mut(), key, value)
    }

    fn find(&mut self, key: &K) -> Option<&V> {
        CoreCache::find(self.core_mut(), key)
    }

    fn exists(&self, key: &K) -> bool {
        CoreCache::exists(self.core(), key)
    }

    fn erase(&mut self, key: &K) -> Option<V> {
        CoreCache::erase(self.core_mut(), key)
    }

    fn len(&self) -> usize {
        self.size()
    }

    fn capacity(&self) -> usize {
        self.core().capacity()
    }

    fn clear(&mut self) {
        self.core_mut().clear()
    }
}

impl<K, V, T, H, E> RecencyCache<K, V> for LruMap<K, V, LockNone, T, H, E>
where
    K: Eq + Hash + Clone,
    T: Timestamping,
    H: HitCounting,
    E: EventLogging<K, V>,
{
    fn front_key(&self) -> Option<&K> {
        self.core().front_key()
    }

    fn back_key(&self) -> Option<&K> {
        self.core().back_key()
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        RecencyCache::recency_rank(self.core(), key)
    }
}
