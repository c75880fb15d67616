// Mon Oct 19 2026 - Alex

use crate::dataset::error::DatasetError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::path::Path;

pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    log::debug!("Wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::reader::{read_contracts, read_parquet};
    use crate::dataset::records::tests::contract_batch;

    #[test]
    fn test_parquet_file_keeps_passthrough_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contracts.parquet");
        let batch = contract_batch(&[&[0x60, 0x08, 0x5A, 0xFA], &[0x00]]);

        write_parquet(&batch, &path).unwrap();
        let contracts = read_contracts(&path).unwrap();

        assert_eq!(contracts.num_rows(), 2);
        assert!(contracts.schema().index_of("block_number").is_ok());
        assert_eq!(contracts.code().unwrap().value(0), Some(&[0x60, 0x08, 0x5A, 0xFA][..]));
    }

    #[test]
    fn test_empty_file_keeps_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.parquet");
        let batch = contract_batch(&[]);

        write_parquet(&batch, &path).unwrap();
        let read = read_parquet(&path).unwrap();

        assert_eq!(read.num_rows(), 0);
        assert_eq!(read.num_columns(), 3);
    }
}
