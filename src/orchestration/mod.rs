// Mon Oct 19 2026 - Alex

pub mod aggregator;
pub mod coordinator;
pub mod error;
pub mod finalizer;

pub use aggregator::{AggregatedOutput, BatchOutcome, FileReport, ResultAggregator, RunTotals};
pub use coordinator::{ScanCoordinator, ScanSummary};
pub use error::ScanError;
pub use finalizer::{OutputFinalizer, OutputPaths};
