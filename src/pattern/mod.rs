// Mon Oct 19 2026 - Alex

pub mod address;
pub mod error;
pub mod filter;
pub mod matcher;

pub use address::format_address;
pub use error::PatternError;
pub use filter::{filter_and_format, match_mask, reduce, reduced_schema, FilteredRecords};
pub use matcher::{PatternMatcher, PatternMode, STATICCALL_PREAMBLE};
