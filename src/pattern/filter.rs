// Mon Oct 19 2026 - Alex

use crate::dataset::records::{with_column, BinaryColumn, ADDRESS_COLUMN, DISASSEMBLED_COLUMN, FORMATTED_ADDRESS_COLUMN};
use crate::pattern::address::format_address;
use crate::pattern::error::PatternError;
use crate::pattern::matcher::PatternMatcher;
use arrow::array::{Array, BooleanArray, LargeStringArray, StringArray};
use arrow::compute::filter_record_batch;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Matching rows with every input column plus `disassembled_code` and `formatted_address`.
#[derive(Debug, Clone)]
pub struct FilteredRecords {
    full: RecordBatch,
}

impl FilteredRecords {
    pub fn num_rows(&self) -> usize {
        self.full.num_rows()
    }

    pub fn full(&self) -> &RecordBatch {
        &self.full
    }

    pub fn into_full(self) -> RecordBatch {
        self.full
    }

    /// Projection down to `disassembled_code` and `formatted_address`.
    pub fn reduced(&self) -> Result<RecordBatch, PatternError> {
        reduce(&self.full)
    }
}

pub fn reduced_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(DISASSEMBLED_COLUMN, DataType::LargeUtf8, true),
        Field::new(FORMATTED_ADDRESS_COLUMN, DataType::Utf8, true),
    ]))
}

pub fn reduce(full: &RecordBatch) -> Result<RecordBatch, PatternError> {
    let schema = full.schema();
    let text = schema.index_of(DISASSEMBLED_COLUMN)
        .map_err(|_| PatternError::MissingColumn(DISASSEMBLED_COLUMN.to_string()))?;
    let address = schema.index_of(FORMATTED_ADDRESS_COLUMN)
        .map_err(|_| PatternError::MissingColumn(FORMATTED_ADDRESS_COLUMN.to_string()))?;

    Ok(full.project(&[text, address])?)
}

/// Builds the keep-mask for `decoded`. Null text never matches.
pub fn match_mask(decoded: &RecordBatch, matcher: &PatternMatcher) -> Result<BooleanArray, PatternError> {
    let index = decoded.schema().index_of(DISASSEMBLED_COLUMN)
        .map_err(|_| PatternError::MissingColumn(DISASSEMBLED_COLUMN.to_string()))?;
    let column = decoded.column(index).as_any();

    let mask: Vec<bool> = if let Some(text) = column.downcast_ref::<LargeStringArray>() {
        text.iter().map(|v| v.map_or(false, |s| matcher.is_match(s))).collect()
    } else if let Some(text) = column.downcast_ref::<StringArray>() {
        text.iter().map(|v| v.map_or(false, |s| matcher.is_match(s))).collect()
    } else {
        return Err(PatternError::MissingColumn(DISASSEMBLED_COLUMN.to_string()));
    };

    Ok(BooleanArray::from(mask))
}

/// Keeps rows of `decoded` whose disassembly contains the pattern and adds
/// their formatted address.
pub fn filter_and_format(decoded: &RecordBatch, matcher: &PatternMatcher) -> Result<FilteredRecords, PatternError> {
    let mask = match_mask(decoded, matcher)?;
    let kept = filter_record_batch(decoded, &mask)?;

    let addresses = BinaryColumn::from_batch(&kept, ADDRESS_COLUMN)?;
    let formatted: StringArray = (0..addresses.len())
        .map(|row| addresses.value(row).map(format_address))
        .collect();

    let full = with_column(
        &kept,
        Field::new(FORMATTED_ADDRESS_COLUMN, DataType::Utf8, true),
        Arc::new(formatted),
    )?;

    Ok(FilteredRecords { full })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::records::tests::contract_batch;
    use crate::engine::{ChunkTask, DisassembleTask};
    use arrow::array::Int64Array;

    fn decoded(codes: &[&[u8]]) -> RecordBatch {
        DisassembleTask::new().execute(&contract_batch(codes)).unwrap()
    }

    #[test]
    fn test_filter_keeps_only_matches() {
        let batch = decoded(&[
            &[0x60, 0x08, 0x5A, 0xFA],
            &[0x60, 0x09, 0x5A, 0xFA],
            &[0x00, 0x60, 0x08, 0x5A, 0xFA, 0x00],
        ]);
        let filtered = filter_and_format(&batch, &PatternMatcher::default()).unwrap();

        assert_eq!(filtered.num_rows(), 2);

        let blocks = filtered.full().column_by_name("block_number").unwrap()
            .as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(blocks.values().to_vec(), vec![0, 2]);

        let formatted = filtered.full().column_by_name(FORMATTED_ADDRESS_COLUMN).unwrap()
            .as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(formatted.value(1), format!("0x{}02", "0".repeat(38)));
    }

    #[test]
    fn test_reduced_projection() {
        let batch = decoded(&[&[0x60, 0x08, 0x5A, 0xFA]]);
        let filtered = filter_and_format(&batch, &PatternMatcher::default()).unwrap();
        let reduced = filtered.reduced().unwrap();

        assert_eq!(reduced.schema(), reduced_schema());
        let text = reduced.column(0).as_any().downcast_ref::<LargeStringArray>().unwrap();
        assert_eq!(text.value(0), "PUSH1 0x8 GAS STATICCALL");
    }

    #[test]
    fn test_no_matches() {
        let batch = decoded(&[&[0x00], &[]]);
        let filtered = filter_and_format(&batch, &PatternMatcher::default()).unwrap();
        assert_eq!(filtered.num_rows(), 0);
        assert_eq!(filtered.reduced().unwrap().num_columns(), 2);
    }

    #[test]
    fn test_requires_disassembly() {
        let batch = contract_batch(&[&[0x00]]);
        assert!(matches!(
            filter_and_format(&batch, &PatternMatcher::default()),
            Err(PatternError::MissingColumn(_))
        ));
    }
}
