//! The LRU engine and its locking facade.

pub mod core;
pub mod map;

pub use self::core::{LruCore, RENDER_HEADER};
#[cfg(feature = "concurrency")]
pub use self::map::{SyncLruMap, ValueGuard};
pub use self::map::LruMap;
