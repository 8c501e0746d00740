//! JSON Lines (JSONL) output writer.
//!
//! One compact JSON object per line with the keys `date, day, time, user,
//! message`. Non-ASCII text is written as UTF-8, and line breaks inside a
//! message are escaped, so every record stays on one physical line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::RecordSink;
use crate::Record;
use crate::error::{LinepackError, Result};

/// Streams records as JSON Lines to any writer.
///
/// ```
/// use linepack::core::output::{JsonlSink, RecordSink};
/// use linepack::Record;
///
/// let mut sink = JsonlSink::new(Vec::new());
/// sink.write_record(&Record::new(None::<String>, None::<String>, "09:00", "Bob", "a\nb"))?;
/// sink.finish()?;
///
/// let out = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(
///     out,
///     "{\"date\":null,\"day\":null,\"time\":\"09:00\",\"user\":\"Bob\",\"message\":\"a\\nb\"}\n"
/// );
/// # Ok::<(), linepack::LinepackError>(())
/// ```
#[derive(Debug)]
pub struct JsonlSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonlSink<W> {
    /// Wraps a writer. Callers writing to a file should pass a `BufWriter`.
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Returns the number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonlSink<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes records to a JSONL file.
pub fn write_jsonl(records: &[Record], output_path: impl AsRef<Path>) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path).map_err(|e| LinepackError::file(path, e))?;
    let mut sink = JsonlSink::new(BufWriter::new(file));

    for record in records {
        sink.write_record(record)?;
    }
    sink.finish()
}

/// Converts records to a JSONL string.
///
/// Same format as [`write_jsonl`], but returns a String instead of writing to file.
pub fn to_jsonl(records: &[Record]) -> Result<String> {
    let mut sink = JsonlSink::new(Vec::new());
    for record in records {
        sink.write_record(record)?;
    }
    sink.finish()?;

    // serde_json only ever writes valid UTF-8
    String::from_utf8(sink.into_inner())
        .map_err(|e| LinepackError::invalid_format("jsonl", e.to_string()))
}
