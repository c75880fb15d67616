// Mon Oct 19 2026 - Alex

pub mod config;
pub mod dataset;
pub mod engine;
pub mod evm;
pub mod orchestration;
pub mod pattern;
pub mod ui;
pub mod utils;

pub use config::{ConfigError, ScanConfig};
pub use dataset::{ContractBatch, DatasetError};
pub use engine::{ParallelExecutor, RemainderPolicy};
pub use evm::{disassemble, Disassembler};
pub use orchestration::{ScanCoordinator, ScanError, ScanSummary};
pub use pattern::{PatternMatcher, PatternMode};
