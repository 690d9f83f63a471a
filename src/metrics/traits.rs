//! Read and publish sides of metrics.
//!
//! Recording lives in the engine; these traits only consume it, so a map
//! built without the `metrics` feature carries no extra code.

use crate::lru::{LruCore, LruMap};
use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::policy::hit_count::HitCounting;
use crate::policy::locking::LockNone;
use crate::policy::timestamp::Timestamping;

/// Produces a snapshot for bench/test inspection or export.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes snapshots to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}

impl<K, V, T, H, E> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCore<K, V, T, H, E>
where
    T: Timestamping,
    H: HitCounting,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            stats: self.stats(),
            len: self.len(),
            capacity: self.capacity(),
        }
    }
}

impl<K, V, T, H, E> MetricsSnapshotProvider<LruMetricsSnapshot>
    for LruMap<K, V, LockNone, T, H, E>
where
    T: Timestamping,
    H: HitCounting,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.core().snapshot()
    }
}

// One lock acquisition, so the counters and gauges are consistent.
#[cfg(feature = "concurrency")]
impl<K, V, T, H, E> MetricsSnapshotProvider<LruMetricsSnapshot>
    for LruMap<K, V, crate::policy::locking::LockExclusive, T, H, E>
where
    T: Timestamping,
    H: HitCounting,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.lock().snapshot()
    }
}
