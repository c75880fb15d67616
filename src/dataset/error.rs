// Mon Oct 19 2026 - Alex

use arrow::datatypes::DataType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("Invalid input pattern: {0}")]
    InvalidGlob(#[from] glob::PatternError),
    #[error("Unreadable input entry: {0}")]
    GlobEntry(#[from] glob::GlobError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Column {column} has unexpected type {data_type}")]
    UnexpectedColumnType { column: String, data_type: DataType },
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
    #[error("Schema of {path:?} does not match earlier input files")]
    SchemaMismatch { path: PathBuf },
}
