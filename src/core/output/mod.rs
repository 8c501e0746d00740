//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_jsonl`] / [`to_jsonl`] / [`JsonlSink`] - JSON Lines, one record per line (default)
//! - [`write_json`] / [`to_json`] / [`JsonSink`] - pretty JSON array of records
//! - [`write_csv`] / [`to_csv`] / [`CsvSink`] - CSV with a header row - requires `csv-output` feature
//!
//! Every format is also available as a [`RecordSink`], so the parser can write
//! records while it is still reading the transcript.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> linepack::Result<()> {
//! use linepack::core::output::{to_jsonl, write_json, write_jsonl};
//! use linepack::Record;
//!
//! let records = vec![
//!     Record::new(Some("2030.01.01"), Some("Wednesday"), "09:00", "Bob", "hello"),
//!     Record::new(None::<String>, None::<String>, "09:05", "Alice", "hi"),
//! ];
//!
//! write_jsonl(&records, "output.jsonl")?;
//! write_json(&records, "output.json")?;
//!
//! let jsonl = to_jsonl(&records)?;
//! assert_eq!(jsonl.lines().count(), 2);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CsvSink, to_csv, write_csv};
pub use json_writer::{JsonSink, to_json, write_json};
pub use jsonl_writer::{JsonlSink, to_jsonl, write_jsonl};

use crate::Record;
use crate::error::Result;

/// Destination for finalized records.
///
/// The parser hands each emitted record to [`write_record`](Self::write_record)
/// as soon as it is finalized, then calls [`finish`](Self::finish) once after
/// the last record. Excluded records never reach a sink.
pub trait RecordSink {
    /// Writes one record.
    fn write_record(&mut self, record: &Record) -> Result<()>;

    /// Flushes any buffered output. Called once at end of input.
    fn finish(&mut self) -> Result<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        (**self).write_record(record)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Collects records in memory.
impl RecordSink for Vec<Record> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
