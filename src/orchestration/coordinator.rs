// Mon Oct 19 2026 - Alex

use crate::config::ScanConfig;
use crate::dataset::{discover_inputs, read_contracts, ContractBatch};
use crate::engine::{combine, partition, ChunkTask, DisassembleTask, ExecutionStats, ParallelExecutor};
use crate::orchestration::aggregator::{BatchOutcome, FileReport, ResultAggregator, RunTotals};
use crate::orchestration::error::ScanError;
use crate::orchestration::finalizer::{OutputFinalizer, OutputPaths};
use crate::pattern::{filter_and_format, PatternMatcher};
use crate::ui::progress::ProgressManager;
use crate::utils::{format_duration, ScopedTimer};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub totals: RunTotals,
    pub reports: Vec<FileReport>,
    pub outputs: OutputPaths,
    pub duration: Duration,
}

/// Runs the scan pipeline over every input file, one file at a time.
///
/// Each file goes through partition, parallel disassembly, filtering and
/// aggregation before the next one is opened, so only one file's rows are
/// resident at once. Outputs are written after the last file unless
/// checkpointing is on, in which case each file's matches are also written
/// as soon as that file completes.
pub struct ScanCoordinator {
    config: ScanConfig,
    executor: ParallelExecutor,
    matcher: PatternMatcher,
    task: DisassembleTask,
    finalizer: OutputFinalizer,
    progress: ProgressManager,
}

impl ScanCoordinator {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;

        let executor = ParallelExecutor::new(config.workers)?;
        let matcher = PatternMatcher::new(&config.pattern, config.pattern_mode)?;
        let finalizer = OutputFinalizer::new(config.output_dir.clone(), config.checkpoint);
        let progress = ProgressManager::with_enabled(config.show_progress);

        Ok(Self {
            config,
            executor,
            matcher,
            task: DisassembleTask::new(),
            finalizer,
            progress,
        })
    }

    pub fn progress(&self) -> &ProgressManager {
        &self.progress
    }

    /// Processes every file matched by the input pattern. `on_file` sees each
    /// file's report as soon as that file is done.
    pub fn run<F>(&self, mut on_file: F) -> Result<ScanSummary, ScanError>
    where
        F: FnMut(&FileReport),
    {
        let started = Instant::now();
        let files = discover_inputs(&self.config.input_pattern)?;

        if files.is_empty() {
            log::warn!("No input files match {}", self.config.input_pattern);
        } else {
            log::info!("Found {} input files matching {}", files.len(), self.config.input_pattern);
        }

        self.finalizer.prepare()?;

        let files_bar = self.progress.create_files_progress(files.len() as u64);
        let mut aggregator = ResultAggregator::new();

        for (index, path) in files.iter().enumerate() {
            let file_name = path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            files_bar.set_message(file_name);

            let report = self.process_file(index, path, &mut aggregator)
                .map_err(|e| e.in_file(path.clone()))?;
            on_file(report);

            files_bar.inc(1);
        }

        files_bar.finish_and_clear();

        let output = aggregator.finish()?;
        let outputs = self.finalizer.write(&output)?;
        let duration = started.elapsed();

        log::info!(
            "Scanned {} files in {} ({} rows skipped, {} rows dropped)",
            output.totals.files,
            format_duration(duration),
            output.totals.skipped_rows,
            output.totals.dropped_rows
        );

        Ok(ScanSummary {
            totals: output.totals,
            reports: output.reports,
            outputs,
            duration,
        })
    }

    fn process_file<'a>(&self, index: usize, path: &Path, aggregator: &'a mut ResultAggregator) -> Result<&'a FileReport, ScanError> {
        let _timer = ScopedTimer::new(&format!("scan {}", path.display()));
        let started = Instant::now();

        let contracts = read_contracts(path)?;
        let outcome = self.process_batch(contracts)?;

        if let Some(paths) = self.finalizer.checkpoint(index, path, &outcome.filtered)? {
            log::debug!("Checkpoint written to {}", paths.full.display());
        }

        aggregator.record(path, outcome, started.elapsed())
    }

    /// Partition, disassemble and filter one batch of contracts.
    pub fn process_batch(&self, contracts: ContractBatch) -> Result<BatchOutcome, ScanError> {
        let original_rows = contracts.num_rows();
        let (contracts, skipped_rows) = contracts.sanitize(self.config.malformed_rows)?;
        if skipped_rows > 0 {
            log::warn!("Skipped {} malformed rows", skipped_rows);
        }

        let records = contracts.into_records();
        let part = partition(records.num_rows(), self.executor.worker_count(), self.config.remainder)?;

        let chunk_bar = self.progress.create_chunk_progress(part.chunks.len() as u64, self.task.name());
        let decoded = self.executor.run(&records, &part.chunks, &self.task, &chunk_bar)?;
        chunk_bar.finish_and_clear();

        let stats = ExecutionStats::from_chunks(&decoded);
        if let Some((chunk, slowest)) = stats.slowest_chunk {
            log::debug!(
                "{} chunks, {} rows, average {:?}, slowest chunk {} at {:?}",
                stats.chunk_count, stats.rows, stats.average_duration(), chunk, slowest
            );
        }

        let combined = combine(&self.task.output_schema(&records.schema()), &decoded)?;
        let filtered = filter_and_format(&combined, &self.matcher)?;

        Ok(BatchOutcome {
            original_rows,
            skipped_rows,
            dropped_rows: part.dropped_rows,
            filtered,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::records::tests::contract_batch;
    use crate::dataset::{read_parquet, write_parquet, DatasetError, MalformedRowPolicy};
    use crate::engine::RemainderPolicy;
    use crate::orchestration::finalizer::CHECKPOINT_DIR;
    use arrow::array::{Array, LargeStringArray, StringArray};

    const HIT: &[u8] = &[0x60, 0x08, 0x5A, 0xFA];
    const MISS: &[u8] = &[0x60, 0x09, 0x5A, 0xFA];

    fn config(dir: &Path) -> ScanConfig {
        ScanConfig::new()
            .with_input_pattern(&format!("{}/data/*.parquet", dir.display()))
            .with_output_dir(dir.join("results"))
            .with_workers(3)
            .with_progress(false)
    }

    fn write_input(dir: &Path, name: &str, codes: &[&[u8]]) {
        write_parquet(&contract_batch(codes), &dir.join("data").join(name)).unwrap();
    }

    #[test]
    fn test_process_batch_drop_remainder() {
        let dir = tempfile::tempdir().unwrap();
        let coordinator = ScanCoordinator::new(config(dir.path()).with_remainder(RemainderPolicy::Drop)).unwrap();

        // 7 rows over 3 workers: the trailing HIT is not covered by any chunk.
        let batch = ContractBatch::new(contract_batch(&[HIT, MISS, MISS, HIT, MISS, MISS, HIT])).unwrap();
        let outcome = coordinator.process_batch(batch).unwrap();

        assert_eq!(outcome.original_rows, 7);
        assert_eq!(outcome.dropped_rows, 1);
        assert_eq!(outcome.filtered.num_rows(), 2);
    }

    #[test]
    fn test_process_batch_include_remainder() {
        let dir = tempfile::tempdir().unwrap();
        let coordinator = ScanCoordinator::new(config(dir.path())).unwrap();

        let batch = ContractBatch::new(contract_batch(&[HIT, MISS, MISS, HIT, MISS, MISS, HIT])).unwrap();
        let outcome = coordinator.process_batch(batch).unwrap();

        assert_eq!(outcome.dropped_rows, 0);
        assert_eq!(outcome.filtered.num_rows(), 3);
        assert_eq!(outcome.stats.rows, 7);
    }

    #[test]
    fn test_run_over_files() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), "a.parquet", &[HIT, MISS, HIT, MISS]);
        write_input(dir.path(), "b.parquet", &[MISS, MISS]);
        write_input(dir.path(), "c.parquet", &[&[0x00, 0x60, 0x08, 0x5A, 0xFA]]);

        let coordinator = ScanCoordinator::new(config(dir.path())).unwrap();
        let mut seen = Vec::new();
        let summary = coordinator.run(|report| seen.push(report.to_string())).unwrap();

        assert_eq!(seen.len(), 3);
        assert!(seen[0].ends_with("a.parquet: Original rows = 4, Filtered rows = 2"));
        assert!(seen[1].ends_with("b.parquet: Original rows = 2, Filtered rows = 0"));
        assert_eq!(summary.totals.original_rows, 7);
        assert_eq!(summary.totals.filtered_rows, 3);

        let full = read_parquet(&summary.outputs.full).unwrap();
        assert_eq!(full.num_rows(), 3);
        assert!(full.schema().index_of("block_number").is_ok());

        let reduced = read_parquet(&summary.outputs.reduced).unwrap();
        assert_eq!(reduced.num_columns(), 2);
        let text = reduced.column(0).as_any().downcast_ref::<LargeStringArray>().unwrap();
        assert_eq!(text.value(2), "STOP PUSH1 0x8 GAS STATICCALL");
        let addresses = reduced.column(1).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(addresses.value(0).len(), 42);
    }

    #[test]
    fn test_run_without_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let coordinator = ScanCoordinator::new(config(dir.path())).unwrap();
        let summary = coordinator.run(|_| {}).unwrap();

        assert_eq!(summary.totals, RunTotals::default());
        assert!(summary.outputs.reduced.exists());
    }

    #[test]
    fn test_checkpoints_written_per_file() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), "a.parquet", &[HIT]);
        write_input(dir.path(), "b.parquet", &[MISS]);

        let coordinator = ScanCoordinator::new(config(dir.path()).with_checkpoint(true)).unwrap();
        coordinator.run(|_| {}).unwrap();

        let checkpoints = dir.path().join("results").join(CHECKPOINT_DIR);
        assert!(checkpoints.join("0000-a.output.parquet").exists());
        assert!(checkpoints.join("0001-b.clean_output.parquet").exists());
    }

    #[test]
    fn test_checkpoints_keep_inputs_with_same_name() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), "a/x.parquet", &[HIT, MISS]);
        write_input(dir.path(), "b/x.parquet", &[HIT, HIT]);

        let config = config(dir.path())
            .with_input_pattern(&format!("{}/data/*/x.parquet", dir.path().display()))
            .with_checkpoint(true);
        let summary = ScanCoordinator::new(config).unwrap().run(|_| {}).unwrap();
        assert_eq!(summary.totals.files, 2);
        assert_eq!(summary.totals.filtered_rows, 3);

        let checkpoints = dir.path().join("results").join(CHECKPOINT_DIR);
        let first = read_parquet(&checkpoints.join("0000-x.output.parquet")).unwrap();
        let second = read_parquet(&checkpoints.join("0001-x.output.parquet")).unwrap();
        assert_eq!(first.num_rows(), 1);
        assert_eq!(second.num_rows(), 2);
        assert_eq!(read_parquet(&checkpoints.join("0000-x.clean_output.parquet")).unwrap().num_rows(), 1);
    }

    #[test]
    fn test_file_error_names_cause_once() {
        let dir = tempfile::tempdir().unwrap();
        let batch = contract_batch(&[HIT]).project(&[0, 2]).unwrap();
        write_parquet(&batch, &dir.path().join("data").join("bad.parquet")).unwrap();

        let err = ScanCoordinator::new(config(dir.path())).unwrap().run(|_| {}).unwrap_err();
        let message = format!("{:#}", anyhow::Error::from(err));

        assert!(message.contains("bad.parquet"));
        assert_eq!(message.matches("Missing required column").count(), 1, "{}", message);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let batch = contract_batch(&[HIT]).project(&[0, 2]).unwrap();
        write_parquet(&batch, &dir.path().join("data").join("bad.parquet")).unwrap();

        let coordinator = ScanCoordinator::new(config(dir.path())).unwrap();
        match coordinator.run(|_| {}) {
            Err(ScanError::File { source, .. }) => assert!(matches!(
                *source,
                ScanError::Dataset(DatasetError::MissingColumn(_))
            )),
            other => panic!("unexpected: {:?}", other.map(|s| s.totals)),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ScanCoordinator::new(config(dir.path()).with_workers(0)).is_err());
        assert!(ScanCoordinator::new(
            config(dir.path()).with_malformed_rows(MalformedRowPolicy::Abort)
        ).is_ok());
    }
}
