// Mon Oct 19 2026 - Alex

use crate::dataset::error::DatasetError;
use crate::dataset::records::ContractBatch;
use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;

/// Loads a whole parquet file into a single batch. Empty files keep their schema.
pub fn read_parquet(path: &Path) -> Result<RecordBatch, DatasetError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }

    log::debug!("Read {} record batches from {}", batches.len(), path.display());

    Ok(concat_batches(&schema, &batches)?)
}

pub fn read_contracts(path: &Path) -> Result<ContractBatch, DatasetError> {
    ContractBatch::new(read_parquet(path)?)
}
