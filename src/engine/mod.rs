// Mon Oct 19 2026 - Alex

pub mod error;
pub mod executor;
pub mod partition;
pub mod result;
pub mod task;

pub use error::{EngineError, TaskError};
pub use executor::{combine, ParallelExecutor, DEFAULT_WORKERS};
pub use partition::{partition, Chunk, Partition, RemainderPolicy};
pub use result::{ChunkOutcome, DecodedChunk, ExecutionStats};
pub use task::{ChunkTask, DisassembleTask};
