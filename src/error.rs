//! Errors surfaced by the map.
//!
//! Only construction can fail in normal use. A key that is not present is an
//! ordinary outcome (`find` yields `None`, `exists` yields `false`, `erase`
//! does nothing), never an error.
//!
//! ```
//! use lrumap::error::LruError;
//! use lrumap::LruCore;
//!
//! let err = LruCore::<u64, u64>::try_new(0).unwrap_err();
//! assert_eq!(err, LruError::InvalidCapacity { capacity: 0 });
//! assert!(err.to_string().contains("capacity"));
//! ```

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LruError {
    /// A map must be able to hold at least one entry.
    #[error("capacity must be >= 1, got {capacity}")]
    InvalidCapacity { capacity: usize },
}

/// Structural corruption found by
/// [`LruCore::check_invariants`](crate::lru::LruCore::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lru invariant broken: {detail}")]
pub struct InvariantError {
    detail: String,
}

impl InvariantError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// What was found, without the common prefix.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}
