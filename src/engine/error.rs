// Mon Oct 19 2026 - Alex

use crate::dataset::DatasetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("Execution error: {0}")]
    Execution(String),
    #[error("Worker panicked: {0}")]
    Panicked(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Worker count must be greater than 0, got {0}")]
    InvalidWorkerCount(usize),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Task {task} failed on chunk {chunk}")]
    Task {
        task: String,
        chunk: usize,
        #[source]
        source: TaskError,
    },
    #[error("Chunk {0} reported no result")]
    MissingResult(usize),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
