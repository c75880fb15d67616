// Mon Oct 19 2026 - Alex

use crate::dataset::MalformedRowPolicy;
use crate::engine::{RemainderPolicy, DEFAULT_WORKERS};
use crate::pattern::{PatternMode, STATICCALL_PREAMBLE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_INPUT_PATTERN: &str = "./data/*.parquet";
pub const DEFAULT_OUTPUT_DIR: &str = "./results";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub input_pattern: String,
    pub output_dir: PathBuf,
    pub workers: usize,
    pub pattern: String,
    pub pattern_mode: PatternMode,
    pub remainder: RemainderPolicy,
    pub malformed_rows: MalformedRowPolicy,
    pub checkpoint: bool,
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input_pattern: DEFAULT_INPUT_PATTERN.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workers: DEFAULT_WORKERS,
            pattern: STATICCALL_PREAMBLE.to_string(),
            pattern_mode: PatternMode::Literal,
            remainder: RemainderPolicy::Include,
            malformed_rows: MalformedRowPolicy::Skip,
            checkpoint: false,
            show_progress: true,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_pattern(mut self, pattern: &str) -> Self {
        self.input_pattern = pattern.to_string();
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_pattern(mut self, pattern: &str, mode: PatternMode) -> Self {
        self.pattern = pattern.to_string();
        self.pattern_mode = mode;
        self
    }

    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn with_malformed_rows(mut self, policy: MalformedRowPolicy) -> Self {
        self.malformed_rows = policy;
        self
    }

    pub fn with_checkpoint(mut self, checkpoint: bool) -> Self {
        self.checkpoint = checkpoint;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ext = path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match ext.to_lowercase().as_str() {
            "json" => {
                let contents = fs::read_to_string(path)?;
                Ok(serde_json::from_str(&contents)?)
            }
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Validation("workers must be greater than 0".to_string()));
        }
        if self.pattern.is_empty() {
            return Err(ConfigError::Validation("pattern must not be empty".to_string()));
        }
        if self.input_pattern.is_empty() {
            return Err(ConfigError::Validation("input pattern must not be empty".to_string()));
        }

        let cores = num_cpus::get();
        if self.workers > cores {
            log::warn!("{} workers requested but only {} CPUs available", self.workers, cores);
        }

        Ok(())
    }
}
