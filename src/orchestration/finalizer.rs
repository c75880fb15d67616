// Mon Oct 19 2026 - Alex

use crate::dataset::{write_parquet, DatasetError};
use crate::orchestration::aggregator::{AggregatedOutput, FileReport, RunTotals};
use crate::orchestration::error::ScanError;
use crate::pattern::FilteredRecords;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const FULL_OUTPUT: &str = "output.parquet";
pub const CLEAN_OUTPUT: &str = "clean_output.parquet";
pub const SUMMARY_OUTPUT: &str = "summary.json";
pub const CHECKPOINT_DIR: &str = "checkpoints";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub full: PathBuf,
    pub reduced: PathBuf,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    totals: &'a RunTotals,
    files: &'a [FileReport],
}

/// Writes run outputs into a single directory.
pub struct OutputFinalizer {
    output_dir: PathBuf,
    checkpoint: bool,
}

impl OutputFinalizer {
    pub fn new(output_dir: PathBuf, checkpoint: bool) -> Self {
        Self { output_dir, checkpoint }
    }

    pub fn prepare(&self) -> Result<(), DatasetError> {
        fs::create_dir_all(&self.output_dir)?;
        if self.checkpoint {
            fs::create_dir_all(self.output_dir.join(CHECKPOINT_DIR))?;
        }
        Ok(())
    }

    /// Persists one file's matches as soon as it is done so a later failure
    /// does not discard them. No-op unless checkpointing is enabled.
    ///
    /// Files are named `<index>-<stem>` where `index` is the input's position
    /// in the discovered list, so inputs sharing a file name in different
    /// directories keep separate checkpoints.
    pub fn checkpoint(&self, index: usize, input: &Path, filtered: &FilteredRecords) -> Result<Option<OutputPaths>, ScanError> {
        if !self.checkpoint {
            return Ok(None);
        }

        let stem = input.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "input".to_string());
        let dir = self.output_dir.join(CHECKPOINT_DIR);
        let paths = OutputPaths {
            full: dir.join(format!("{:04}-{}.{}", index, stem, FULL_OUTPUT)),
            reduced: dir.join(format!("{:04}-{}.{}", index, stem, CLEAN_OUTPUT)),
        };

        write_parquet(filtered.full(), &paths.full)?;
        write_parquet(&filtered.reduced()?, &paths.reduced)?;
        log::debug!("Checkpointed {} rows from {}", filtered.num_rows(), input.display());

        Ok(Some(paths))
    }

    pub fn write(&self, output: &AggregatedOutput) -> Result<OutputPaths, ScanError> {
        let paths = OutputPaths {
            full: self.output_dir.join(FULL_OUTPUT),
            reduced: self.output_dir.join(CLEAN_OUTPUT),
        };

        write_parquet(&output.full, &paths.full)?;
        write_parquet(&output.reduced, &paths.reduced)?;
        self.write_summary(output)?;

        Ok(paths)
    }

    fn write_summary(&self, output: &AggregatedOutput) -> Result<(), DatasetError> {
        let summary = RunSummary {
            totals: &output.totals,
            files: &output.reports,
        };
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| DatasetError::Io(e.into()))?;
        fs::write(self.output_dir.join(SUMMARY_OUTPUT), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::read_parquet;
    use crate::orchestration::aggregator::ResultAggregator;

    #[test]
    fn test_write_empty_run() {
        let dir = tempfile::tempdir().unwrap();
        let finalizer = OutputFinalizer::new(dir.path().join("results"), false);
        finalizer.prepare().unwrap();

        let output = ResultAggregator::new().finish().unwrap();
        let paths = finalizer.write(&output).unwrap();

        let reduced = read_parquet(&paths.reduced).unwrap();
        assert_eq!(reduced.num_rows(), 0);
        assert_eq!(reduced.num_columns(), 2);
        assert!(dir.path().join("results").join(SUMMARY_OUTPUT).exists());
    }

    #[test]
    fn test_checkpoint_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let finalizer = OutputFinalizer::new(dir.path().to_path_buf(), false);
        finalizer.prepare().unwrap();
        assert!(!dir.path().join(CHECKPOINT_DIR).exists());
    }
}
