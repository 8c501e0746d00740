//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::RecordSink;
use crate::Record;
use crate::error::{LinepackError, Result};

const HEADER: [&str; 5] = ["date", "day", "time", "user", "message"];

/// Streams records as CSV rows.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `date`, `day`, `time`, `user`, `message`
/// - Absent date/day: empty cell
/// - Multi-line messages are quoted, line breaks kept
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    /// Wraps a writer. The header row is written with the first record, or on
    /// finish if there are no records.
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().from_writer(writer),
            header_written: false,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| LinepackError::Io(e.into_error()))
    }

    fn ensure_header(&mut self) -> Result<()> {
        if !self.header_written {
            self.writer.write_record(HEADER)?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        self.ensure_header()?;
        self.writer.write_record([
            record.date().unwrap_or_default(),
            record.day().unwrap_or_default(),
            record.time(),
            record.user(),
            record.message(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.ensure_header()?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes records to a CSV file.
pub fn write_csv(records: &[Record], output_path: impl AsRef<Path>) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path).map_err(|e| LinepackError::file(path, e))?;
    let mut sink = CsvSink::new(file);
    for record in records {
        sink.write_record(record)?;
    }
    sink.finish()
}

/// Converts records to a CSV string.
pub fn to_csv(records: &[Record]) -> Result<String> {
    let mut sink = CsvSink::new(Vec::new());
    for record in records {
        sink.write_record(record)?;
    }
    sink.finish()?;

    String::from_utf8(sink.into_inner()?)
        .map_err(|e| LinepackError::invalid_format("csv", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_csv_basic() {
        let records = vec![
            Record::new(Some("2030.01.01"), Some("Wednesday"), "09:00", "Bob", "hello"),
            Record::new(None::<String>, None::<String>, "09:05", "Alice", "hi"),
        ];

        let csv = to_csv(&records).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,day,time,user,message"));
        assert_eq!(lines.next(), Some("2030.01.01,Wednesday,09:00,Bob,hello"));
        assert_eq!(lines.next(), Some(",,09:05,Alice,hi"));
    }

    #[test]
    fn test_csv_quotes_multiline_and_commas() {
        let records = vec![Record::new(
            Some("2030.01.01"),
            Some("Wednesday"),
            "09:00",
            "Bob",
            "a, b\nc",
        )];
        let csv = to_csv(&records).unwrap();
        assert!(csv.contains("\"a, b\nc\""));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[4], "a, b\nc");
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        assert_eq!(to_csv(&[]).unwrap(), "date,day,time,user,message\n");
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![Record::new(
            Some("2026.01.09"),
            Some("金曜日"),
            "01:54",
            "ロキシー",
            "こんばんは",
        )];
        write_csv(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("2026.01.09,金曜日,01:54,ロキシー,こんばんは"));
    }
}
