//! Streaming reader for LINE talk history exports.
//!
//! Reads one physical line at a time, so memory use is bounded by the
//! longest single message rather than by the transcript size.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::Record;
use crate::config::LineConfig;
use crate::core::{Assembler, Finalized, ParseStats};
use crate::error::{LinepackError, Result};
use crate::parsing::split_terminated;

use super::RecordIterator;

const BOM: char = '\u{feff}';

/// Iterator over the emitted records of one transcript.
///
/// Excluded records are counted in [`stats`](RecordIterator::stats) but never
/// yielded. An I/O error (including invalid UTF-8) is yielded once as `Err`
/// and ends the stream; the in-flight record is not flushed in that case.
pub struct RecordStream<R: BufRead> {
    reader: R,
    assembler: Assembler,
    line_buffer: String,
    pending: VecDeque<Record>,
    bytes_read: u64,
    total_bytes: Option<u64>,
    first_line: bool,
    finished: bool,
}

impl RecordStream<BufReader<File>> {
    /// Opens a transcript file with a buffer of `config.buffer_size` bytes.
    pub fn open(path: impl AsRef<Path>, config: &LineConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LinepackError::file(path, e))?;
        let file_size = file
            .metadata()
            .map_err(|e| LinepackError::file(path, e))?
            .len();

        debug!(path = %path.display(), bytes = file_size, "opened transcript");

        let reader = BufReader::with_capacity(config.buffer_size, file);
        Ok(Self::new(reader, config)?.with_total_bytes(file_size))
    }
}

impl<R: BufRead> RecordStream<R> {
    /// Wraps any buffered reader.
    pub fn new(reader: R, config: &LineConfig) -> Result<Self> {
        Ok(Self {
            reader,
            assembler: Assembler::new(config)?,
            line_buffer: String::with_capacity(4096),
            pending: VecDeque::new(),
            bytes_read: 0,
            total_bytes: None,
            first_line: true,
            finished: false,
        })
    }

    /// Sets the input size used for [`progress`](RecordIterator::progress).
    #[must_use]
    pub fn with_total_bytes(mut self, total: u64) -> Self {
        self.total_bytes = Some(total);
        self
    }

    /// Returns `true` once the input is exhausted or an error was yielded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Reads up to and including the next `\n`. `Ok(false)` at EOF.
    fn read_line(&mut self) -> std::io::Result<bool> {
        self.line_buffer.clear();
        let bytes = self.reader.read_line(&mut self.line_buffer)?;
        self.bytes_read += bytes as u64;
        Ok(bytes > 0)
    }
}

/// Drops a byte order mark from the first chunk of the input.
fn strip_bom(chunk: &str, first_line: bool) -> &str {
    if first_line {
        chunk.strip_prefix(BOM).unwrap_or(chunk)
    } else {
        chunk
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }
            match self.read_line() {
                Ok(true) => {
                    let chunk = strip_bom(&self.line_buffer, self.first_line);
                    self.first_line = false;
                    // A chunk holds several lines when the export uses bare `\r`.
                    for line in split_terminated(chunk) {
                        if let Some(Finalized::Emitted(record)) = self.assembler.feed(line) {
                            self.pending.push_back(record);
                        }
                    }
                }
                Ok(false) => {
                    self.finished = true;
                    self.pending
                        .extend(self.assembler.finish().and_then(Finalized::into_emitted));
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
        self.pending.pop_front().map(Ok)
    }
}

impl<R: BufRead> RecordIterator for RecordStream<R> {
    fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    fn stats(&self) -> ParseStats {
        self.assembler.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn stream(input: &str, config: &LineConfig) -> RecordStream<Cursor<Vec<u8>>> {
        RecordStream::new(Cursor::new(input.as_bytes().to_vec()), config).unwrap()
    }

    #[test]
    fn test_stream_yields_records_in_order() {
        let input = "2026.01.09 金曜日\n01:54 ロキシー こんばんは\n明日の予定は？\n01:55 ユキ はい\n";
        let records: Vec<Record> = stream(input, &LineConfig::default())
            .map(Result::unwrap)
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message(), "こんばんは\n明日の予定は？");
        assert_eq!(records[1].user(), "ユキ");
    }

    #[test]
    fn test_stream_strips_crlf() {
        let input = "2030.01.01 Wednesday\r\n09:00 Bob hello\r\nthere\r\n";
        let records: Vec<Record> = stream(input, &LineConfig::english())
            .map(Result::unwrap)
            .collect();

        assert_eq!(records[0].day(), Some("Wednesday"));
        assert_eq!(records[0].message(), "hello\nthere");
    }

    #[test]
    fn test_stream_strips_leading_bom() {
        let input = "\u{feff}2030.01.01 Wednesday\n09:00 Bob hi\n";
        let records: Vec<Record> = stream(input, &LineConfig::english())
            .map(Result::unwrap)
            .collect();
        assert_eq!(records[0].date(), Some("2030.01.01"));
    }

    #[test]
    fn test_stream_last_line_without_newline() {
        let records: Vec<Record> = stream("09:00 Bob hi\nmore", &LineConfig::english())
            .map(Result::unwrap)
            .collect();
        assert_eq!(records[0].message(), "hi\nmore");
    }

    #[test]
    fn test_stream_counts_excluded() {
        let mut iter = stream(
            "2030.01.01 Wednesday\n09:00 Bob hello\nthere\n09:05 Bob Image\n",
            &LineConfig::english(),
        );
        let records: Vec<Record> = iter.by_ref().map(Result::unwrap).collect();

        assert_eq!(records.len(), 1);
        assert_eq!(iter.stats().excluded, 1);
        assert!(iter.stats().is_conserved());
        assert!(iter.is_finished());
    }

    #[test]
    fn test_stream_empty_input() {
        let mut iter = stream("", &LineConfig::default());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_stream_invalid_utf8_is_error() {
        let bytes = b"09:00 Bob hi\n\xff\xfe\n".to_vec();
        let mut iter = RecordStream::new(Cursor::new(bytes), &LineConfig::english()).unwrap();

        let results: Vec<_> = iter.by_ref().collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].as_ref().unwrap_err().is_io());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_open_reports_progress() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "09:00 Bob hi\n09:01 Ann yo\n").unwrap();

        let mut iter = RecordStream::open(file.path(), &LineConfig::english()).unwrap();
        assert_eq!(iter.total_bytes(), Some(26));
        assert_eq!(iter.progress(), Some(0.0));

        let count = iter.by_ref().count();
        assert_eq!(count, 2);
        assert_eq!(iter.bytes_processed(), 26);
        assert_eq!(iter.progress(), Some(100.0));
    }

    #[test]
    fn test_open_missing_file() {
        let result = RecordStream::open("/nonexistent/talk.txt", &LineConfig::default());
        assert!(result.is_err_and(|e| e.is_io()));
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}abc\n", true), "abc\n");
        assert_eq!(strip_bom("\u{feff}abc\n", false), "\u{feff}abc\n");
    }

    #[test]
    fn test_stream_bare_carriage_returns() {
        let input = "2030.01.01 Wednesday\r09:00 Bob hello\rthere\r09:05 Ann hi\r";
        let mut iter = stream(input, &LineConfig::english());
        let records: Vec<Record> = iter.by_ref().map(Result::unwrap).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].day(), Some("Wednesday"));
        assert_eq!(records[0].message(), "hello\nthere");
        assert_eq!(records[1].user(), "Ann");
        assert_eq!(iter.stats().orphan_lines, 0);
    }
}
