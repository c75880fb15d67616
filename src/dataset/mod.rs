// Mon Oct 19 2026 - Alex

pub mod discovery;
pub mod error;
pub mod reader;
pub mod records;
pub mod writer;

pub use discovery::discover_inputs;
pub use error::DatasetError;
pub use reader::{read_contracts, read_parquet};
pub use records::{
    BinaryColumn, ContractBatch, MalformedRowPolicy, ADDRESS_COLUMN, CODE_COLUMN,
    DISASSEMBLED_COLUMN, FORMATTED_ADDRESS_COLUMN,
};
pub use writer::write_parquet;
