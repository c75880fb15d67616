// Mon Oct 19 2026 - Alex

use crate::dataset::error::DatasetError;
use arrow::array::{Array, ArrayRef, BinaryArray, BooleanArray, FixedSizeBinaryArray, LargeBinaryArray};
use arrow::compute::filter_record_batch;
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const CODE_COLUMN: &str = "code";
pub const ADDRESS_COLUMN: &str = "contract_address";
pub const DISASSEMBLED_COLUMN: &str = "disassembled_code";
pub const FORMATTED_ADDRESS_COLUMN: &str = "formatted_address";

pub const ADDRESS_LEN: usize = 20;

/// Read-only view over a binary-valued column, whatever its physical width.
pub enum BinaryColumn<'a> {
    Binary(&'a BinaryArray),
    LargeBinary(&'a LargeBinaryArray),
    Fixed(&'a FixedSizeBinaryArray),
}

impl<'a> BinaryColumn<'a> {
    pub fn from_batch(batch: &'a RecordBatch, name: &str) -> Result<Self, DatasetError> {
        let index = batch.schema().index_of(name)
            .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
        Self::from_array(batch.column(index).as_ref(), name)
    }

    pub fn from_array(array: &'a dyn Array, name: &str) -> Result<Self, DatasetError> {
        let any = array.as_any();

        if let Some(a) = any.downcast_ref::<BinaryArray>() {
            return Ok(BinaryColumn::Binary(a));
        }
        if let Some(a) = any.downcast_ref::<LargeBinaryArray>() {
            return Ok(BinaryColumn::LargeBinary(a));
        }
        if let Some(a) = any.downcast_ref::<FixedSizeBinaryArray>() {
            return Ok(BinaryColumn::Fixed(a));
        }

        Err(DatasetError::UnexpectedColumnType {
            column: name.to_string(),
            data_type: array.data_type().clone(),
        })
    }

    pub fn len(&self) -> usize {
        match self {
            BinaryColumn::Binary(a) => a.len(),
            BinaryColumn::LargeBinary(a) => a.len(),
            BinaryColumn::Fixed(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `None` for null slots.
    pub fn value(&self, row: usize) -> Option<&'a [u8]> {
        match *self {
            BinaryColumn::Binary(a) => (!a.is_null(row)).then(|| a.value(row)),
            BinaryColumn::LargeBinary(a) => (!a.is_null(row)).then(|| a.value(row)),
            BinaryColumn::Fixed(a) => (!a.is_null(row)).then(|| a.value(row)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Drop rows with a null `code`/`contract_address` or a short address, and log them.
    #[default]
    Skip,
    /// Treat the first malformed row as fatal for the run.
    Abort,
}

/// Contract rows loaded from one input file.
///
/// Construction checks that `code` and `contract_address` exist and are
/// binary columns. Every other column is carried along untouched.
#[derive(Debug, Clone)]
pub struct ContractBatch {
    batch: RecordBatch,
}

impl ContractBatch {
    pub fn new(batch: RecordBatch) -> Result<Self, DatasetError> {
        BinaryColumn::from_batch(&batch, CODE_COLUMN)?;
        BinaryColumn::from_batch(&batch, ADDRESS_COLUMN)?;
        Ok(Self { batch })
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn records(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn into_records(self) -> RecordBatch {
        self.batch
    }

    pub fn code(&self) -> Result<BinaryColumn<'_>, DatasetError> {
        BinaryColumn::from_batch(&self.batch, CODE_COLUMN)
    }

    pub fn addresses(&self) -> Result<BinaryColumn<'_>, DatasetError> {
        BinaryColumn::from_batch(&self.batch, ADDRESS_COLUMN)
    }

    /// Indices of rows that cannot be decoded, with the reason.
    pub fn malformed_rows(&self) -> Result<Vec<(usize, String)>, DatasetError> {
        let code = self.code()?;
        let addresses = self.addresses()?;
        let mut malformed = Vec::new();

        for row in 0..self.num_rows() {
            if code.value(row).is_none() {
                malformed.push((row, format!("null {}", CODE_COLUMN)));
                continue;
            }
            match addresses.value(row) {
                None => malformed.push((row, format!("null {}", ADDRESS_COLUMN))),
                Some(addr) if addr.len() != ADDRESS_LEN => {
                    malformed.push((row, format!("{} is {} bytes, expected {}", ADDRESS_COLUMN, addr.len(), ADDRESS_LEN)));
                }
                Some(_) => {}
            }
        }

        Ok(malformed)
    }

    /// Applies `policy` to malformed rows. Returns the cleaned batch and the
    /// number of rows removed.
    pub fn sanitize(self, policy: MalformedRowPolicy) -> Result<(Self, usize), DatasetError> {
        let mut malformed = self.malformed_rows()?;
        if malformed.is_empty() {
            return Ok((self, 0));
        }

        if policy == MalformedRowPolicy::Abort {
            let (row, reason) = malformed.remove(0);
            return Err(DatasetError::MalformedRow { row, reason });
        }

        for (row, reason) in malformed.iter().take(5) {
            log::debug!("Skipping row {}: {}", row, reason);
        }

        let mut keep = vec![true; self.num_rows()];
        for (row, _) in &malformed {
            keep[*row] = false;
        }
        let mask = BooleanArray::from(keep);
        let batch = filter_record_batch(&self.batch, &mask)?;

        Ok((Self { batch }, malformed.len()))
    }
}

/// Returns `batch` with `array` as column `field.name()`, replacing a column
/// of the same name if present.
pub fn with_column(batch: &RecordBatch, field: Field, array: ArrayRef) -> Result<RecordBatch, DatasetError> {
    let schema = batch.schema();
    let mut fields: Vec<Arc<Field>> = schema.fields().iter().cloned().collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();

    match schema.index_of(field.name()) {
        Ok(index) => {
            fields[index] = Arc::new(field);
            columns[index] = array;
        }
        Err(_) => {
            fields.push(Arc::new(field));
            columns.push(array);
        }
    }

    let schema = Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()));
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Schema of `schema` with `field` appended or substituted in place.
pub fn schema_with_field(schema: &SchemaRef, field: Field) -> SchemaRef {
    let mut fields: Vec<Arc<Field>> = schema.fields().iter().cloned().collect();
    match schema.index_of(field.name()) {
        Ok(index) => fields[index] = Arc::new(field),
        Err(_) => fields.push(Arc::new(field)),
    }
    Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use arrow::array::{FixedSizeBinaryBuilder, Int64Array, StringArray};
    use arrow::datatypes::DataType;

    pub(crate) fn contract_batch(codes: &[&[u8]]) -> RecordBatch {
        let code: BinaryArray = codes.iter().map(|c| Some(*c)).collect();
        let mut addresses = FixedSizeBinaryBuilder::new(ADDRESS_LEN as i32);
        for i in 0..codes.len() {
            let mut addr = [0u8; ADDRESS_LEN];
            addr[ADDRESS_LEN - 1] = i as u8;
            addresses.append_value(addr).unwrap();
        }
        let block: Int64Array = (0..codes.len() as i64).collect();

        let schema = Arc::new(Schema::new(vec![
            Field::new(CODE_COLUMN, DataType::Binary, true),
            Field::new(ADDRESS_COLUMN, DataType::FixedSizeBinary(ADDRESS_LEN as i32), true),
            Field::new("block_number", DataType::Int64, false),
        ]));

        RecordBatch::try_new(schema, vec![Arc::new(code), Arc::new(addresses.finish()), Arc::new(block)]).unwrap()
    }

    #[test]
    fn test_contract_batch_requires_columns() {
        let schema = Arc::new(Schema::new(vec![Field::new(CODE_COLUMN, DataType::Binary, true)]));
        let code: BinaryArray = vec![Some(&[0x00u8][..])].into_iter().collect();
        let batch = RecordBatch::try_new(schema, vec![Arc::new(code)]).unwrap();

        match ContractBatch::new(batch) {
            Err(DatasetError::MissingColumn(name)) => assert_eq!(name, ADDRESS_COLUMN),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_contract_batch_rejects_text_code() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(CODE_COLUMN, DataType::Utf8, true),
            Field::new(ADDRESS_COLUMN, DataType::Binary, true),
        ]));
        let code = StringArray::from(vec!["6008"]);
        let addr: BinaryArray = vec![Some(&[0u8; 20][..])].into_iter().collect();
        let batch = RecordBatch::try_new(schema, vec![Arc::new(code), Arc::new(addr)]).unwrap();

        assert!(matches!(
            ContractBatch::new(batch),
            Err(DatasetError::UnexpectedColumnType { .. })
        ));
    }

    #[test]
    fn test_sanitize_skips_null_code() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(CODE_COLUMN, DataType::Binary, true),
            Field::new(ADDRESS_COLUMN, DataType::Binary, true),
        ]));
        let code: BinaryArray = vec![Some(&[0x00u8][..]), None, Some(&[0x01u8][..])].into_iter().collect();
        let addr: BinaryArray = vec![Some(&[1u8; 20][..]), Some(&[2u8; 20][..]), Some(&[3u8; 19][..])].into_iter().collect();
        let batch = RecordBatch::try_new(schema, vec![Arc::new(code), Arc::new(addr)]).unwrap();
        let contracts = ContractBatch::new(batch).unwrap();

        assert_eq!(contracts.malformed_rows().unwrap().len(), 2);

        let (clean, skipped) = contracts.clone().sanitize(MalformedRowPolicy::Skip).unwrap();
        assert_eq!(skipped, 2);
        assert_eq!(clean.num_rows(), 1);

        match contracts.sanitize(MalformedRowPolicy::Abort) {
            Err(DatasetError::MalformedRow { row, .. }) => assert_eq!(row, 1),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_with_column_appends_and_replaces() {
        let batch = contract_batch(&[&[0x00], &[0x01]]);
        let field = Field::new("extra", DataType::Utf8, false);
        let added = with_column(&batch, field.clone(), Arc::new(StringArray::from(vec!["a", "b"]))).unwrap();
        assert_eq!(added.num_columns(), 4);

        let replaced = with_column(&added, field, Arc::new(StringArray::from(vec!["c", "d"]))).unwrap();
        assert_eq!(replaced.num_columns(), 4);
        let extra = replaced.column(3).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(extra.value(1), "d");
    }
}
