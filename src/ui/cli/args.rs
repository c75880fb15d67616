// Wed Oct 21 2026 - Alex

use crate::config::ScanConfig;
use crate::dataset::MalformedRowPolicy;
use crate::engine::RemainderPolicy;
use crate::pattern::PatternMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_INSPECT_PATH: &str = "./results/clean_output.parquet";

#[derive(Parser, Debug)]
#[command(name = "evm-pattern-scan")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Disassemble EVM bytecode in bulk and filter by instruction pattern", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Disassemble every contract in the input files and keep pattern matches
    Scan(ScanArgs),
    /// Preview a parquet file written by `scan`
    Inspect(InspectArgs),
    /// Disassemble a single hex-encoded bytecode string
    Disasm(DisasmArgs),
}

#[derive(Parser, Debug, Default)]
pub struct ScanArgs {
    /// Glob matching the input parquet files
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long)]
    pub workers: Option<usize>,

    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Treat the pattern as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Leave out rows that do not divide evenly between workers
    #[arg(long)]
    pub drop_remainder: bool,

    /// Write each file's matches as soon as it is processed
    #[arg(long)]
    pub checkpoint: bool,

    /// Fail on rows with a null code or malformed address instead of skipping them
    #[arg(long)]
    pub strict: bool,

    #[arg(long)]
    pub no_progress: bool,

    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ScanArgs {
    /// Layers the flags that were given over `base`.
    pub fn apply(&self, mut base: ScanConfig) -> ScanConfig {
        if let Some(input) = &self.input {
            base.input_pattern = input.clone();
        }
        if let Some(output) = &self.output {
            base.output_dir = output.clone();
        }
        if let Some(workers) = self.workers {
            base.workers = workers;
        }
        if let Some(pattern) = &self.pattern {
            base.pattern = pattern.clone();
        }
        if self.regex {
            base.pattern_mode = PatternMode::Regex;
        }
        if self.drop_remainder {
            base.remainder = RemainderPolicy::Drop;
        }
        if self.checkpoint {
            base.checkpoint = true;
        }
        if self.strict {
            base.malformed_rows = MalformedRowPolicy::Abort;
        }
        if self.no_progress {
            base.show_progress = false;
        }
        base
    }
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    #[arg(default_value = DEFAULT_INSPECT_PATH)]
    pub path: PathBuf,

    /// Rows to preview
    #[arg(short, long, default_value = "5")]
    pub rows: usize,

    /// Row whose full disassembly is printed
    #[arg(short, long, default_value = "2")]
    pub sample: usize,
}

#[derive(Parser, Debug)]
pub struct DisasmArgs {
    pub bytecode: String,

    /// Print one instruction per line with its program counter
    #[arg(long)]
    pub listing: bool,
}
