// Mon Oct 19 2026 - Alex

use crate::engine::error::EngineError;
use serde::{Deserialize, Serialize};

/// What happens to the `total % workers` rows left after equal-size chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainderPolicy {
    /// Fold leftover rows into the last chunk.
    #[default]
    Include,
    /// Leave leftover rows out of every chunk. They never reach the output.
    Drop,
}

/// A contiguous row range handed to a single worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub offset: usize,
    pub len: usize,
}

impl Chunk {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub chunks: Vec<Chunk>,
    pub chunk_size: usize,
    pub dropped_rows: usize,
}

impl Partition {
    pub fn covered_rows(&self) -> usize {
        self.chunks.iter().map(|c| c.len).sum()
    }
}

/// Splits `total_records` rows into exactly `worker_count` contiguous chunks
/// of `total_records / worker_count` rows each.
pub fn partition(total_records: usize, worker_count: usize, policy: RemainderPolicy) -> Result<Partition, EngineError> {
    if worker_count == 0 {
        return Err(EngineError::InvalidWorkerCount(worker_count));
    }

    let chunk_size = total_records / worker_count;
    let remainder = total_records % worker_count;

    let mut chunks: Vec<Chunk> = (0..worker_count)
        .map(|index| Chunk {
            index,
            offset: index * chunk_size,
            len: chunk_size,
        })
        .collect();

    let dropped_rows = match policy {
        RemainderPolicy::Include => {
            if let Some(last) = chunks.last_mut() {
                last.len += remainder;
            }
            0
        }
        RemainderPolicy::Drop => remainder,
    };

    if dropped_rows > 0 {
        log::warn!(
            "Dropping {} trailing rows not covered by {} chunks of {}",
            dropped_rows, worker_count, chunk_size
        );
    }

    Ok(Partition {
        chunks,
        chunk_size,
        dropped_rows,
    })
}
