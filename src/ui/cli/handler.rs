// Wed Oct 21 2026 - Alex

use super::args::{Args, Command, DisasmArgs, InspectArgs, ScanArgs};
use crate::config::ScanConfig;
use crate::dataset::{read_parquet, DISASSEMBLED_COLUMN};
use crate::evm::{disassemble, Disassembler};
use crate::orchestration::ScanCoordinator;
use crate::ui::banner::Banner;
use crate::ui::table::BatchTable;
use crate::ui::{print_info, print_success, print_warning};
use crate::utils::{format_duration, parse_hex, LoggingUtils};
use anyhow::{anyhow, Context};
use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use colored::Colorize;
use log::LevelFilter;

pub struct CommandHandler {
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        self.quiet = args.quiet;

        if args.no_color {
            colored::control::set_override(false);
        }

        self.setup_logging(&args);

        // Disassembly output is meant to be piped, so it never gets the banner.
        if !self.quiet && !matches!(args.command, Command::Disasm(_)) {
            Banner::print();
        }

        match args.command {
            Command::Scan(scan_args) => self.handle_scan(scan_args),
            Command::Inspect(inspect_args) => self.handle_inspect(inspect_args),
            Command::Disasm(disasm_args) => self.handle_disasm(disasm_args),
        }
    }

    fn setup_logging(&self, args: &Args) {
        let mut level = LoggingUtils::level_from_str(&args.log_level);
        if self.quiet {
            level = level.min(LevelFilter::Warn);
        }
        LoggingUtils::init_logger(level);
    }

    fn handle_scan(&self, args: ScanArgs) -> anyhow::Result<()> {
        let base = match &args.config {
            Some(path) => ScanConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ScanConfig::default(),
        };
        let config = args.apply(base);

        if !self.quiet {
            print_info(&format!("Input:   {}", config.input_pattern));
            print_info(&format!("Output:  {}", config.output_dir.display()));
            print_info(&format!("Workers: {}", config.workers));
            print_info(&format!("Pattern: {} ({:?})", config.pattern, config.pattern_mode));
        }

        let coordinator = ScanCoordinator::new(config)?;
        let summary = coordinator.run(|report| coordinator.progress().println(&report.to_string()))?;

        println!("{}", summary.totals);

        if summary.totals.files == 0 {
            print_warning("No input files were found; empty outputs written");
        }
        if summary.totals.skipped_rows > 0 {
            print_warning(&format!("{} malformed rows skipped", summary.totals.skipped_rows));
        }
        if summary.totals.dropped_rows > 0 {
            print_warning(&format!("{} remainder rows not processed", summary.totals.dropped_rows));
        }

        if !self.quiet {
            print_success(&format!(
                "Wrote {} and {} in {}",
                summary.outputs.full.display(),
                summary.outputs.reduced.display(),
                format_duration(summary.duration)
            ));
        }

        Ok(())
    }

    fn handle_inspect(&self, args: InspectArgs) -> anyhow::Result<()> {
        let batch = read_parquet(&args.path)
            .with_context(|| format!("reading {}", args.path.display()))?;

        println!("{}", "Schema:".cyan().bold());
        for field in batch.schema().fields() {
            let nullable = if field.is_nullable() { ", nullable" } else { "" };
            println!("  {}: {}{}", field.name(), field.data_type(), nullable);
        }
        println!();
        println!("{} {}", "Rows:".cyan().bold(), batch.num_rows());

        if batch.num_rows() == 0 {
            return Ok(());
        }

        let table = BatchTable::new()
            .with_color(!self.quiet)
            .with_batch(&batch, args.rows)?;
        println!("{}", table.build());

        match sample_text(&batch, args.sample)? {
            Some(text) => {
                println!();
                println!("{} {}", format!("{} of row {}:", DISASSEMBLED_COLUMN, args.sample).cyan().bold(), text);
            }
            None => print_warning(&format!("Row {} has no {}", args.sample, DISASSEMBLED_COLUMN)),
        }

        Ok(())
    }

    fn handle_disasm(&self, args: DisasmArgs) -> anyhow::Result<()> {
        let code = parse_hex(&args.bytecode).context("bytecode is not valid hex")?;

        if args.listing {
            for instruction in Disassembler::new(&code) {
                println!("{}", instruction);
            }
        } else {
            println!("{}", disassemble(&code));
        }

        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Full disassembly text of one row, or `None` when the value is null.
fn sample_text(batch: &RecordBatch, row: usize) -> anyhow::Result<Option<String>> {
    if row >= batch.num_rows() {
        return Err(anyhow!("sample row {} out of range, file has {} rows", row, batch.num_rows()));
    }

    let column = batch.column_by_name(DISASSEMBLED_COLUMN)
        .ok_or_else(|| anyhow!("file has no {} column", DISASSEMBLED_COLUMN))?;

    if column.is_null(row) {
        return Ok(None);
    }

    let text = match column.data_type() {
        DataType::LargeUtf8 => column.as_string::<i64>().value(row),
        DataType::Utf8 => column.as_string::<i32>().value(row),
        other => return Err(anyhow!("{} has unexpected type {}", DISASSEMBLED_COLUMN, other)),
    };

    Ok(Some(text.to_string()))
}
