pub use crate::builder::LruBuilder;
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::entry::Entry;
pub use crate::error::{InvariantError, LruError};
#[cfg(feature = "concurrency")]
pub use crate::lru::{SyncLruMap, ValueGuard};
pub use crate::lru::{LruCore, LruMap};
#[cfg(feature = "metrics")]
pub use crate::metrics::{
    LruMetricsSnapshot, MetricsExporter, MetricsSnapshotProvider, PrometheusTextExporter,
};
#[cfg(feature = "concurrency")]
pub use crate::policy::LockExclusive;
pub use crate::policy::{
    Event, EventLogging, HitCountDisabled, HitCountEnabled, HitCounting, LockNone, Locking,
    LogAll, LogFacade, LogNone, LogOverflow, LogSink, TimestampAll, TimestampNone, Timestamping,
    Timestamps,
};
pub use crate::stats::LruStats;
pub use crate::traits::{ConcurrentCache, CoreCache, RecencyCache};
