//! Output Surfaces
//!
//! Per-tick metrics collection and read-only graph snapshots for external
//! reporting and rendering collaborators.

pub mod snapshot;
pub mod stats;

pub use snapshot::{generate_snapshot, write_snapshot};
pub use stats::{collect_metrics, write_metrics, MetricsCollector};
