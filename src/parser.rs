//! Single entry point for parsing LINE talk history exports.
//!
//! [`LineParser`] wraps the line classifier and reassembly state machine behind
//! in-memory, reader-based, file-based and streaming entry points. Every call
//! gets a fresh [`Assembler`], so one parser value can be reused across many
//! transcripts without date context or in-flight records leaking between them.
//!
//! # Example
//!
//! ```rust
//! use linepack::config::LineConfig;
//! use linepack::parser::LineParser;
//!
//! let parser = LineParser::with_config(LineConfig::english());
//! let parsed = parser.parse_str(
//!     "2030.01.01 Wednesday\n09:00 Bob hello\nthere\n09:05 Bob Image\n",
//! )?;
//!
//! assert_eq!(parsed.records.len(), 1);
//! assert_eq!(parsed.records[0].message(), "hello\nthere");
//! assert_eq!(parsed.excluded_count(), 1);
//! # Ok::<(), linepack::LinepackError>(())
//! ```
//!
//! # Streaming to a sink
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufWriter;
//!
//! use linepack::core::output::JsonlSink;
//! use linepack::parser::LineParser;
//!
//! let parser = LineParser::new();
//! let mut sink = JsonlSink::new(BufWriter::new(File::create("talk.jsonl")?));
//! let stats = parser.convert("talk.txt", &mut sink)?;
//! eprintln!("{} excluded", stats.excluded);
//! # Ok::<(), linepack::LinepackError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::Record;
use crate::config::LineConfig;
use crate::core::output::RecordSink;
use crate::core::{Assembler, Finalized, ParseStats};
use crate::error::Result;
use crate::parsing::split_terminated;
use crate::streaming::{RecordIterator, RecordStream};

/// The result of parsing one transcript in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    /// Emitted records in input order.
    pub records: Vec<Record>,
    /// Counters for the run.
    pub stats: ParseStats,
}

impl Parsed {
    /// Number of records dropped by the media placeholder rule.
    pub fn excluded_count(&self) -> usize {
        self.stats.excluded
    }

    /// Consumes the result, returning just the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Parser for LINE talk history exports.
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    config: LineConfig,
}

impl LineParser {
    /// Creates a parser with the Japanese defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom heuristics.
    pub fn with_config(config: LineConfig) -> Self {
        Self { config }
    }

    /// Returns the parser's configuration.
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    /// Parses already-split lines without touching the filesystem.
    ///
    /// Lines must not carry their terminators.
    ///
    /// # Errors
    ///
    /// Only fails when the configuration is invalid.
    pub fn parse_lines<I>(&self, lines: I) -> Result<Parsed>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut assembler = Assembler::new(&self.config)?;
        let mut records = Vec::new();

        for line in lines {
            if let Some(Finalized::Emitted(record)) = assembler.feed(line.as_ref()) {
                records.push(record);
            }
        }
        if let Some(Finalized::Emitted(record)) = assembler.finish() {
            records.push(record);
        }

        Ok(Parsed {
            records,
            stats: assembler.stats(),
        })
    }

    /// Parses a whole transcript held in a string.
    ///
    /// Accepts `\n`, `\r\n` and bare `\r` line endings and a leading byte
    /// order mark.
    pub fn parse_str(&self, content: &str) -> Result<Parsed> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        self.parse_lines(content.split_inclusive('\n').flat_map(split_terminated))
    }

    /// Parses a transcript from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`LinepackError::Io`](crate::LinepackError::Io) if reading fails
    /// or the input is not valid UTF-8.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Parsed> {
        let mut stream = RecordStream::new(reader, &self.config)?;
        let records = stream.by_ref().collect::<Result<Vec<_>>>()?;
        Ok(Parsed {
            records,
            stats: stream.stats(),
        })
    }

    /// Parses a transcript file into memory.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<Parsed> {
        let mut stream = self.stream(path)?;
        let records = stream.by_ref().collect::<Result<Vec<_>>>()?;
        Ok(Parsed {
            records,
            stats: stream.stats(),
        })
    }

    /// Opens a transcript file for record-by-record streaming.
    pub fn stream(&self, path: impl AsRef<Path>) -> Result<RecordStream<BufReader<File>>> {
        RecordStream::open(path, &self.config)
    }

    /// Streams a transcript file into `sink`, writing each record as soon as
    /// it is finalized, then calls [`RecordSink::finish`].
    pub fn convert<S>(&self, input: impl AsRef<Path>, sink: &mut S) -> Result<ParseStats>
    where
        S: RecordSink + ?Sized,
    {
        let input = input.as_ref();
        let stats = drain_into(self.stream(input)?, sink)?;
        debug!(
            input = %input.display(),
            emitted = stats.emitted,
            excluded = stats.excluded,
            "converted transcript"
        );
        Ok(stats)
    }

    /// Same as [`convert`](Self::convert) for an already-open reader.
    pub fn convert_reader<R, S>(&self, reader: R, sink: &mut S) -> Result<ParseStats>
    where
        R: BufRead,
        S: RecordSink + ?Sized,
    {
        drain_into(RecordStream::new(reader, &self.config)?, sink)
    }
}

fn drain_into<I, S>(mut stream: I, sink: &mut S) -> Result<ParseStats>
where
    I: RecordIterator,
    S: RecordSink + ?Sized,
{
    for record in stream.by_ref() {
        sink.write_record(&record?)?;
    }
    sink.finish()?;
    Ok(stream.stats())
}
