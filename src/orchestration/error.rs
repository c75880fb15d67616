// Mon Oct 19 2026 - Alex

use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::engine::EngineError;
use crate::pattern::PatternError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("Failed to process {path:?}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<ScanError>,
    },
}

impl ScanError {
    pub fn in_file(self, path: PathBuf) -> Self {
        ScanError::File {
            path,
            source: Box::new(self),
        }
    }
}
