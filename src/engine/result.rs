// Mon Oct 19 2026 - Alex

use crate::engine::error::TaskError;
use crate::engine::partition::Chunk;
use arrow::record_batch::RecordBatch;
use std::time::Duration;

/// What a worker sends back for one chunk.
#[derive(Debug)]
pub struct ChunkOutcome {
    pub chunk: Chunk,
    pub result: Result<RecordBatch, TaskError>,
    pub duration: Duration,
}

/// A processed chunk. Rows keep their original relative order.
#[derive(Debug, Clone)]
pub struct DecodedChunk {
    pub chunk: Chunk,
    pub records: RecordBatch,
    pub duration: Duration,
}

impl DecodedChunk {
    pub fn num_rows(&self) -> usize {
        self.records.num_rows()
    }
}

/// Per-batch bookkeeping returned alongside the decoded chunks.
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub chunk_count: usize,
    pub rows: usize,
    pub total_duration: Duration,
    pub slowest_chunk: Option<(usize, Duration)>,
}

impl ExecutionStats {
    pub fn from_chunks(chunks: &[DecodedChunk]) -> Self {
        let mut stats = Self::default();

        for chunk in chunks {
            stats.chunk_count += 1;
            stats.rows += chunk.num_rows();
            stats.total_duration += chunk.duration;

            let slower = stats.slowest_chunk.map_or(true, |(_, d)| chunk.duration > d);
            if slower {
                stats.slowest_chunk = Some((chunk.chunk.index, chunk.duration));
            }
        }

        stats
    }

    pub fn average_duration(&self) -> Duration {
        if self.chunk_count == 0 {
            Duration::ZERO
        } else {
            self.total_duration / self.chunk_count as u32
        }
    }
}
