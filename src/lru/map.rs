//! Locking facade over [`LruCore`].
//!
//! `LruMap<K, V, L, T, H, E>` stores the engine as `L::Storage<LruCore<..>>`:
//!
//! - `LockNone`: the engine itself. The API takes `&mut self` for mutation and
//!   [`find`](LruMap::find) hands out a plain `&V`.
//! - `LockExclusive`: a `parking_lot::Mutex` around the engine. Every method
//!   takes `&self` and holds the lock for its whole duration. `find` returns a
//!   [`ValueGuard`] that keeps the lock until it is dropped, so no other
//!   caller can evict the value being read.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::ops::Deref;

#[cfg(feature = "concurrency")]
use parking_lot::{MappedMutexGuard, MutexGuard};

use crate::entry::Entry;
use crate::error::{InvariantError, LruError};
use crate::lru::core::LruCore;
use crate::policy::event_log::{EventLogging, LogNone};
use crate::policy::hit_count::{HitCountDisabled, HitCounting};
#[cfg(feature = "concurrency")]
use crate::policy::locking::LockExclusive;
use crate::policy::locking::{LockNone, Locking};
use crate::policy::timestamp::{TimestampNone, Timestamping};
use crate::stats::LruStats;

/// Bounded key-value map with least-recently-used replacement.
///
/// # Example
///
/// ```
/// use lrumap::LruMap;
///
/// let mut map: LruMap<u64, &str> = LruMap::try_new(2).unwrap();
/// map.insert(1, "a");
/// map.insert(2, "b");
/// map.find(&1);
/// map.insert(3, "c");
///
/// assert!(map.exists(&1));
/// assert!(!map.exists(&2));
/// assert_eq!(map.size(), 2);
/// ```
pub struct LruMap<
    K,
    V,
    L: Locking = LockNone,
    T: Timestamping = TimestampNone,
    H: HitCounting = HitCountDisabled,
    E = LogNone,
> {
    core: L::Storage<LruCore<K, V, T, H, E>>,
}

/// `LruMap` guarded by an exclusive mutex.
#[cfg(feature = "concurrency")]
pub type SyncLruMap<K, V, T = TimestampNone, H = HitCountDisabled, E = LogNone> =
    LruMap<K, V, LockExclusive, T, H, E>;

impl<K, V, L, T, H, E> LruMap<K, V, L, T, H, E>
where
    L: Locking,
    T: Timestamping,
    H: HitCounting,
{
    /// Fails with [`LruError::InvalidCapacity`] when `capacity == 0`.
    pub fn try_new(capacity: usize) -> Result<Self, LruError>
    where
        T: Default,
        E: Default,
    {
        LruCore::try_new(capacity).map(Self::from_core)
    }

    pub fn with_policies(capacity: usize, timestamping: T, logging: E) -> Result<Self, LruError> {
        LruCore::with_policies(capacity, timestamping, logging).map(Self::from_core)
    }

    pub fn from_core(core: LruCore<K, V, T, H, E>) -> Self {
        Self {
            core: L::wrap(core),
        }
    }

    pub fn into_core(self) -> LruCore<K, V, T, H, E> {
        L::into_inner(self.core)
    }

    /// Direct engine access; never blocks since `&mut self` proves exclusivity.
    pub fn core_mut(&mut self) -> &mut LruCore<K, V, T, H, E> {
        L::get_mut(&mut self.core)
    }
}

impl<K, V, T, H, E> LruMap<K, V, LockNone, T, H, E>
where
    T: Timestamping,
    H: HitCounting,
{
    pub fn core(&self) -> &LruCore<K, V, T, H, E> {
        &self.core
    }

    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    pub fn stats(&self) -> LruStats {
        self.core.stats()
    }

    pub fn valid(&self) -> bool {
        self.core.valid()
    }

    /// Entries from most to least recent.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Entry<K, V, T, H>> + '_ {
        self.core.iter()
    }
}

impl<K, V, T, H, E> LruMap<K, V, LockNone, T, H, E>
where
    K: Eq + Hash + Clone,
    T: Timestamping,
    H: HitCounting,
    E: EventLogging<K, V>,
{
    pub fn insert(&mut self, key: K, value: V) {
        self.core.insert(key, value);
    }

    pub fn find<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.find(key)
    }

    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.exists(key)
    }

    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.peek(key)
    }

    pub fn erase<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.erase(key)
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.recency_rank(key)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.core.check_invariants()
    }
}

impl<K, V, T, H, E> LruMap<K, V, LockNone, T, H, E>
where
    K: fmt::Display,
    V: fmt::Display,
    T: Timestamping,
    H: HitCounting,
{
    pub fn render(&self) -> String {
        self.core.render()
    }
}

impl<K, V, T, H, E> Extend<(K, V)> for LruMap<K, V, LockNone, T, H, E>
where
    K: Eq + Hash + Clone,
    T: Timestamping,
    H: HitCounting,
    E: EventLogging<K, V>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.core.extend(iter);
    }
}

/// Read access to a value found in a locked map.
///
/// The map's mutex stays held while the guard lives; drop it before calling
/// back into the same map from this thread.
#[cfg(feature = "concurrency")]
pub struct ValueGuard<'a, V>(MappedMutexGuard<'a, V>);

#[cfg(feature = "concurrency")]
impl<V> Deref for ValueGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.0
    }
}

#[cfg(feature = "concurrency")]
impl<V: fmt::Debug> fmt::Debug for ValueGuard<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

#[cfg(feature = "concurrency")]
impl<V: fmt::Display> fmt::Display for ValueGuard<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, T, H, E> LruMap<K, V, LockExclusive, T, H, E>
where
    T: Timestamping,
    H: HitCounting,
{
    /// Locks the engine for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, LruCore<K, V, T, H, E>> {
        self.core.lock()
    }

    /// Runs `f` with the engine locked.
    pub fn with_core<R>(&self, f: impl FnOnce(&mut LruCore<K, V, T, H, E>) -> R) -> R {
        f(&mut *self.core.lock())
    }

    pub fn capacity(&self) -> usize {
        self.core.lock().capacity()
    }

    pub fn size(&self) -> usize {
        self.core.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.lock().is_empty()
    }

    pub fn stats(&self) -> LruStats {
        self.core.lock().stats()
    }

    pub fn valid(&self) -> bool {
        self.core.lock().valid()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, T, H, E> LruMap<K, V, LockExclusive, T, H, E>
where
    K: Eq + Hash + Clone,
    T: Timestamping,
    H: HitCounting,
    E: EventLogging<K, V>,
{
    pub fn insert(&self, key: K, value: V) {
        self.core.lock().insert(key, value);
    }

    /// Finds `key` and returns a guard over its value.
    pub fn find<Q>(&self, key: &Q) -> Option<ValueGuard<'_, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let guard = self.core.lock();
        MutexGuard::try_map(guard, |core| core.find_value_mut(key))
            .ok()
            .map(ValueGuard)
    }

    /// Finds `key` and clones its value, releasing the lock before returning.
    pub fn find_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.core.lock().find_cloned(key)
    }

    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.lock().exists(key)
    }

    pub fn peek_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.core.lock().peek(key).cloned()
    }

    pub fn erase<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.lock().erase(key)
    }

    pub fn clear(&self) {
        self.core.lock().clear();
    }

    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.lock().recency_rank(key)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.core.lock().check_invariants()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, T, H, E> LruMap<K, V, LockExclusive, T, H, E>
where
    K: fmt::Display,
    V: fmt::Display,
    T: Timestamping,
    H: HitCounting,
{
    pub fn render(&self) -> String {
        self.core.lock().render()
    }
}

impl<K, V, T, H, E> fmt::Debug for LruMap<K, V, LockNone, T, H, E>
where
    T: Timestamping,
    H: HitCounting,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruMap")
            .field("locking", &"none")
            .field("core", &self.core)
            .finish()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, T, H, E> fmt::Debug for LruMap<K, V, LockExclusive, T, H, E>
where
    T: Timestamping,
    H: HitCounting,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("LruMap");
        out.field("locking", &"exclusive");
        match self.core.try_lock() {
            Some(core) => out.field("core", &*core),
            None => out.field("core", &"<locked>"),
        };
        out.finish()
    }
}
