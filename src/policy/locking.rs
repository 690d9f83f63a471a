//! Locking policies: how the engine is stored inside an [`LruMap`](crate::lru::LruMap).
//!
//! The policy maps the engine type `C` to its storage:
//!
//! | Policy          | `Storage<C>`               | Extra fields | Receiver  |
//! |-----------------|----------------------------|--------------|-----------|
//! | `LockNone`      | `C`                        | none         | `&mut self` |
//! | `LockExclusive` | `parking_lot::Mutex<C>`    | one mutex    | `&self`   |
//!
//! Under `LockNone` the borrow checker serializes callers. Under
//! `LockExclusive` every public operation holds the mutex for its whole
//! duration; the lock is not reentrant, so hooks must never call back into
//! the map that invoked them.

/// Storage strategy for the map's engine.
pub trait Locking {
    type Storage<C>;

    fn wrap<C>(core: C) -> Self::Storage<C>;

    /// Exclusive access through `&mut`, never blocking.
    fn get_mut<C>(storage: &mut Self::Storage<C>) -> &mut C;

    fn into_inner<C>(storage: Self::Storage<C>) -> C;
}

/// No synchronization; the engine is stored inline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockNone;

impl Locking for LockNone {
    type Storage<C> = C;

    #[inline(always)]
    fn wrap<C>(core: C) -> Self::Storage<C> {
        core
    }

    #[inline(always)]
    fn get_mut<C>(storage: &mut Self::Storage<C>) -> &mut C {
        storage
    }

    #[inline(always)]
    fn into_inner<C>(storage: Self::Storage<C>) -> C {
        storage
    }
}

/// Exclusive `parking_lot::Mutex` around the engine.
#[cfg(feature = "concurrency")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockExclusive;

#[cfg(feature = "concurrency")]
impl Locking for LockExclusive {
    type Storage<C> = parking_lot::Mutex<C>;

    #[inline]
    fn wrap<C>(core: C) -> Self::Storage<C> {
        parking_lot::Mutex::new(core)
    }

    #[inline]
    fn get_mut<C>(storage: &mut Self::Storage<C>) -> &mut C {
        storage.get_mut()
    }

    #[inline]
    fn into_inner<C>(storage: Self::Storage<C>) -> C {
        storage.into_inner()
    }
}
