// Mon Oct 19 2026 - Alex

use crate::engine::error::{EngineError, TaskError};
use crate::engine::partition::Chunk;
use crate::engine::result::{ChunkOutcome, DecodedChunk};
use crate::engine::task::ChunkTask;
use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use indicatif::ProgressBar;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::time::Instant;

pub const DEFAULT_WORKERS: usize = 11;

/// Fixed-size worker pool that runs one [`ChunkTask`] call per chunk.
///
/// Workers only read their own zero-copy slice of the batch and report back
/// over a channel, so results arrive in completion order. `run` returns
/// once every chunk has reported.
pub struct ParallelExecutor {
    worker_count: usize,
    pool: ThreadPool,
}

impl ParallelExecutor {
    pub fn new(worker_count: usize) -> Result<Self, EngineError> {
        if worker_count == 0 {
            return Err(EngineError::InvalidWorkerCount(worker_count));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("disasm-worker-{}", i))
            .build()?;

        Ok(Self { worker_count, pool })
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Runs `task` over every chunk of `batch`. The first failed chunk fails
    /// the whole batch; nothing is retried.
    pub fn run<T: ChunkTask>(
        &self,
        batch: &RecordBatch,
        chunks: &[Chunk],
        task: &T,
        progress: &ProgressBar,
    ) -> Result<Vec<DecodedChunk>, EngineError> {
        let (sender, receiver) = mpsc::channel::<ChunkOutcome>();

        let outcomes = self.pool.in_place_scope(|scope| {
            for chunk in chunks {
                let chunk = *chunk;
                let records = batch.slice(chunk.offset, chunk.len);
                let sender = sender.clone();

                scope.spawn(move |_| {
                    let started = Instant::now();
                    let result = panic::catch_unwind(AssertUnwindSafe(|| task.execute(&records)))
                        .unwrap_or_else(|payload| Err(TaskError::Panicked(panic_message(payload.as_ref()))));

                    let _ = sender.send(ChunkOutcome {
                        chunk,
                        result,
                        duration: started.elapsed(),
                    });
                });
            }
            drop(sender);

            let mut outcomes = Vec::with_capacity(chunks.len());
            for outcome in receiver.iter() {
                log::trace!(
                    "Chunk {} ({} rows) finished in {:?}",
                    outcome.chunk.index, outcome.chunk.len, outcome.duration
                );
                progress.inc(1);
                outcomes.push(outcome);
            }
            outcomes
        });

        self.collect(chunks, outcomes, task.name())
    }

    fn collect(&self, chunks: &[Chunk], outcomes: Vec<ChunkOutcome>, task: &str) -> Result<Vec<DecodedChunk>, EngineError> {
        let mut decoded = Vec::with_capacity(outcomes.len());

        for outcome in outcomes {
            match outcome.result {
                Ok(records) => decoded.push(DecodedChunk {
                    chunk: outcome.chunk,
                    records,
                    duration: outcome.duration,
                }),
                Err(source) => {
                    log::error!("Chunk {} failed: {}", outcome.chunk.index, source);
                    return Err(EngineError::Task {
                        task: task.to_string(),
                        chunk: outcome.chunk.index,
                        source,
                    });
                }
            }
        }

        if let Some(missing) = chunks.iter().find(|c| !decoded.iter().any(|d| d.chunk.index == c.index)) {
            return Err(EngineError::MissingResult(missing.index));
        }

        Ok(decoded)
    }
}

/// Concatenates decoded chunks in the order given (completion order).
pub fn combine(schema: &SchemaRef, chunks: &[DecodedChunk]) -> Result<RecordBatch, EngineError> {
    Ok(concat_batches(schema, chunks.iter().map(|c| &c.records))?)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
