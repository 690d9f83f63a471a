//! Compile-time policies that specialize an LRU map.
//!
//! ```text
//!   LruMap<K, V, L, T, H, E>
//!             │  │  │  └── EventLogging  : LogNone | LogOverflow<S> | LogAll<S>
//!             │  │  └───── HitCounting   : HitCountDisabled | HitCountEnabled
//!             │  └──────── Timestamping  : TimestampNone | TimestampAll<C>
//!             └─────────── Locking       : LockNone | LockExclusive
//! ```
//!
//! Each "none" variant is a zero-sized type whose per-entry storage is `()`
//! and whose hooks are empty `#[inline(always)]` functions, so an unselected
//! feature costs neither bytes nor instructions.

pub mod event_log;
pub mod hit_count;
pub mod locking;
pub mod timestamp;

pub use event_log::{Event, EventLogging, LogAll, LogFacade, LogNone, LogOverflow, LogSink};
pub use hit_count::{HitCountDisabled, HitCountEnabled, HitCounting};
#[cfg(feature = "concurrency")]
pub use locking::LockExclusive;
pub use locking::{LockNone, Locking};
pub use timestamp::{TimestampAll, TimestampNone, Timestamping, Timestamps};
