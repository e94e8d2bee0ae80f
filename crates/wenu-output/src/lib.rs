//! WenuFilter Output
//!
//! Output sinks for selection records.
//!
//! Provides:
//! - The [`RecordSink`] line-oriented sink interface
//! - A buffered CSV file sink with the fixed record header
//! - An in-memory sink for tests and dry runs

pub mod csv;
pub mod sink;

pub use csv::{format_record, write_header, write_record, CsvSink, HEADER};
pub use sink::{MemorySink, RecordSink};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::csv::{CsvSink, HEADER};
    pub use crate::sink::{MemorySink, RecordSink};
}
