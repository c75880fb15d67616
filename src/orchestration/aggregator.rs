// Mon Oct 19 2026 - Alex

use crate::dataset::DatasetError;
use crate::engine::ExecutionStats;
use crate::orchestration::error::ScanError;
use crate::pattern::{reduce, reduced_schema, FilteredRecords};
use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Result of running one batch through partition, disassembly and filtering.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub original_rows: usize,
    pub skipped_rows: usize,
    pub dropped_rows: usize,
    pub filtered: FilteredRecords,
    pub stats: ExecutionStats,
}

/// Counters carried across input files. Only the driving thread touches them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub files: usize,
    pub original_rows: usize,
    pub filtered_rows: usize,
    pub skipped_rows: usize,
    pub dropped_rows: usize,
}

impl fmt::Display for RunTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total original rows = {}, Total filtered rows = {}",
            self.original_rows, self.filtered_rows
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub original_rows: usize,
    pub filtered_rows: usize,
    pub skipped_rows: usize,
    pub dropped_rows: usize,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File {}: Original rows = {}, Filtered rows = {}",
            self.path.display(),
            self.original_rows,
            self.filtered_rows
        )
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(duration.as_millis())
    }
}

/// Both output projections plus the final counters.
#[derive(Debug, Clone)]
pub struct AggregatedOutput {
    pub full: RecordBatch,
    pub reduced: RecordBatch,
    pub totals: RunTotals,
    pub reports: Vec<FileReport>,
}

/// Accumulates per-file results in processing order.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    totals: RunTotals,
    reports: Vec<FileReport>,
    results: Vec<RecordBatch>,
    schema: Option<SchemaRef>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self) -> RunTotals {
        self.totals
    }

    pub fn reports(&self) -> &[FileReport] {
        &self.reports
    }

    /// Folds one file into the totals and returns its report right away.
    pub fn record(&mut self, path: &Path, outcome: BatchOutcome, duration: Duration) -> Result<&FileReport, ScanError> {
        let full = outcome.filtered.into_full();

        if let Some(schema) = &self.schema {
            if schema.fields() != full.schema().fields() {
                return Err(DatasetError::SchemaMismatch { path: path.to_path_buf() }.into());
            }
        } else {
            self.schema = Some(full.schema());
        }

        let report = FileReport {
            path: path.to_path_buf(),
            original_rows: outcome.original_rows,
            filtered_rows: full.num_rows(),
            skipped_rows: outcome.skipped_rows,
            dropped_rows: outcome.dropped_rows,
            duration,
        };

        self.totals.files += 1;
        self.totals.original_rows += report.original_rows;
        self.totals.filtered_rows += report.filtered_rows;
        self.totals.skipped_rows += report.skipped_rows;
        self.totals.dropped_rows += report.dropped_rows;

        self.results.push(full);
        self.reports.push(report);

        Ok(&self.reports[self.reports.len() - 1])
    }

    pub fn finish(self) -> Result<AggregatedOutput, ScanError> {
        let (full, reduced) = match &self.schema {
            Some(schema) => {
                let full = concat_batches(schema, &self.results)?;
                let reduced = reduce(&full)?;
                (full, reduced)
            }
            None => {
                let empty = RecordBatch::new_empty(reduced_schema());
                (empty.clone(), empty)
            }
        };

        Ok(AggregatedOutput {
            full,
            reduced,
            totals: self.totals,
            reports: self.reports,
        })
    }
}
