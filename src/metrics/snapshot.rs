use crate::stats::LruStats;

/// Point-in-time view of an LRU map: its lifetime counters plus gauges
/// captured when the snapshot was taken.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LruMetricsSnapshot {
    pub stats: LruStats,

    // gauges
    pub len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of finds that hit, or `None` before the first find.
    pub fn hit_ratio(&self) -> Option<f64> {
        self.stats.hit_ratio()
    }

    /// `len / capacity`, in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.len as f64 / self.capacity as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios() {
        let snapshot = LruMetricsSnapshot {
            stats: LruStats {
                num_find: 4,
                num_find_ok: 3,
                ..LruStats::default()
            },
            len: 2,
            capacity: 8,
        };
        assert_eq!(snapshot.hit_ratio(), Some(0.75));
        assert_eq!(snapshot.fill_ratio(), 0.25);
        assert_eq!(LruMetricsSnapshot::default().fill_ratio(), 0.0);
        assert_eq!(LruMetricsSnapshot::default().hit_ratio(), None);
    }
}
