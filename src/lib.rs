//! lrumap: a bounded key-value map with least-recently-used replacement,
//! specialized at compile time by locking, timestamping, hit-counting and
//! event-logging policies.
//!
//! ```
//! use lrumap::prelude::*;
//!
//! let mut map: LruMap<&str, u32> = LruMap::try_new(2).unwrap();
//! map.insert("a", 1);
//! map.insert("b", 2);
//! map.find("a");
//! map.insert("c", 3);
//!
//! assert!(!map.exists("b"));
//! assert_eq!(map.stats().num_overflow, 1);
//! ```

pub mod builder;
pub mod clock;
pub mod ds;
pub mod entry;
pub mod error;
pub mod lru;
pub mod policy;
pub mod stats;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use builder::LruBuilder;
pub use entry::Entry;
pub use error::{InvariantError, LruError};
#[cfg(feature = "concurrency")]
pub use lru::{SyncLruMap, ValueGuard};
pub use lru::{LruCore, LruMap};
pub use stats::LruStats;
