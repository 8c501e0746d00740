//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::RecordSink;
use crate::Record;
use crate::error::{LinepackError, Result};

/// Buffers records and writes them as one pretty-printed JSON array on
/// [`finish`](RecordSink::finish).
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
    records: Vec<Record>,
}

impl<W: Write> JsonSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.records.clear();
        Ok(())
    }
}

/// Writes records to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {
///     "date": "2030.01.01",
///     "day": "Wednesday",
///     "time": "09:00",
///     "user": "Bob",
///     "message": "hello"
///   }
/// ]
/// ```
pub fn write_json(records: &[Record], output_path: impl AsRef<Path>) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path).map_err(|e| LinepackError::file(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a pretty JSON array string.
pub fn to_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
