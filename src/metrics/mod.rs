//! Metrics snapshots and export.
//!
//! Recording is the engine's own [`LruStats`](crate::stats::LruStats) block;
//! this module only reads it (`MetricsSnapshotProvider`) and publishes it
//! (`MetricsExporter`).
//!
//! ```text
//!   LruCore / LruMap ──snapshot()──► LruMetricsSnapshot ──export()──► PrometheusTextExporter<W>
//! ```

pub mod exporter;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use snapshot::LruMetricsSnapshot;
pub use traits::{MetricsExporter, MetricsSnapshotProvider};
