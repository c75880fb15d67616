// Mon Oct 19 2026 - Alex

use crate::dataset::DatasetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Match pattern must not be empty")]
    Empty,
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
    #[error("Missing {0} column in decoded records")]
    MissingColumn(String),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
