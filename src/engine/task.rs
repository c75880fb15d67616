// Mon Oct 19 2026 - Alex

use crate::dataset::records::{with_column, schema_with_field, BinaryColumn, CODE_COLUMN, DISASSEMBLED_COLUMN};
use crate::engine::error::TaskError;
use crate::evm::disassemble_into;
use arrow::array::{ArrayRef, LargeStringBuilder};
use arrow::datatypes::{DataType, Field, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Work applied independently to every chunk of a batch.
///
/// Implementations must not rely on shared mutable state: the executor runs
/// one call per chunk, concurrently, and keeps only the returned batch.
pub trait ChunkTask: Send + Sync {
    fn name(&self) -> &str;

    /// Schema of the batches `execute` produces for `input`.
    fn output_schema(&self, input: &SchemaRef) -> SchemaRef;

    fn execute(&self, records: &RecordBatch) -> Result<RecordBatch, TaskError>;
}

/// Appends a `disassembled_code` text column decoded from `code`.
#[derive(Debug, Clone, Default)]
pub struct DisassembleTask;

impl DisassembleTask {
    pub fn new() -> Self {
        Self
    }

    fn field() -> Field {
        Field::new(DISASSEMBLED_COLUMN, DataType::LargeUtf8, true)
    }
}

impl ChunkTask for DisassembleTask {
    fn name(&self) -> &str {
        "disassemble"
    }

    fn output_schema(&self, input: &SchemaRef) -> SchemaRef {
        schema_with_field(input, Self::field())
    }

    fn execute(&self, records: &RecordBatch) -> Result<RecordBatch, TaskError> {
        let code = BinaryColumn::from_batch(records, CODE_COLUMN)?;
        let mut builder = LargeStringBuilder::with_capacity(code.len(), 0);
        let mut text = String::new();

        for row in 0..code.len() {
            match code.value(row) {
                Some(bytes) => {
                    text.clear();
                    disassemble_into(bytes, &mut text);
                    builder.append_value(&text);
                }
                None => builder.append_null(),
            }
        }

        let array: ArrayRef = Arc::new(builder.finish());
        Ok(with_column(records, Self::field(), array)?)
    }
}
