//! Cumulative operation counters.

use std::fmt;

/// Lifetime counters for one map. They only ever increase and survive
/// [`clear`](crate::lru::LruCore::clear).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LruStats {
    /// Calls to insert.
    pub num_insert: u64,
    /// Inserts that pushed out the least recent entry.
    pub num_overflow: u64,
    /// Calls to find, hit or miss.
    pub num_find: u64,
    /// Calls to find that hit.
    pub num_find_ok: u64,
    /// Calls to erase, present or not.
    pub num_erase: u64,
    /// Calls to clear.
    pub num_clear: u64,
}

impl LruStats {
    /// Finds that missed.
    pub fn num_find_miss(&self) -> u64 {
        self.num_find - self.num_find_ok
    }

    /// Hit ratio in `[0, 1]`, or `None` before the first find.
    pub fn hit_ratio(&self) -> Option<f64> {
        if self.num_find == 0 {
            None
        } else {
            Some(self.num_find_ok as f64 / self.num_find as f64)
        }
    }
}

impl fmt::Display for LruStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "num_insert = {}, num_overflow = {}, num_find = {}, num_find_ok = {}, num_erase = {}, num_clear = {}",
            self.num_insert,
            self.num_overflow,
            self.num_find,
            self.num_find_ok,
            self.num_erase,
            self.num_clear
        )
    }
}
