//! Directory-level conversion driver.
//!
//! Finds transcripts, converts each one with its own parser state, and writes
//! `<output_dir>/<stem>.<ext>` next to the others. A failing file is recorded
//! in the [`BatchReport`] and the remaining files are still processed.
//!
//! # Example
//!
//! ```rust,no_run
//! use linepack::batch::{BatchOptions, collect_inputs, convert_all};
//!
//! let inputs = collect_inputs("targets")?;
//! let report = convert_all(&inputs, "output", &BatchOptions::default());
//!
//! println!(
//!     "{} messages from {} files ({} excluded)",
//!     report.total_messages(),
//!     report.files.len(),
//!     report.total_excluded()
//! );
//! # Ok::<(), linepack::LinepackError>(())
//! ```

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::Record;
use crate::config::LineConfig;
use crate::core::filter::FilterConfig;
use crate::core::output::RecordSink;
use crate::error::{LinepackError, Result};
use crate::format::OutputFormat;
use crate::parser::LineParser;
use crate::streaming::RecordIterator;

/// Extension of transcript files picked up from a directory.
pub const INPUT_EXTENSION: &str = "txt";

/// Settings shared by every file in a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Parser heuristics.
    pub config: LineConfig,
    /// Output format for every file.
    pub format: OutputFormat,
    /// Post-parse filter applied before writing.
    pub filter: FilterConfig,
}

/// Outcome of converting one transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Transcript that was read.
    pub input: PathBuf,
    /// File that was written.
    pub output: PathBuf,
    /// Records written to `output`.
    pub emitted: usize,
    /// Records dropped by the media placeholder rule.
    pub excluded: usize,
    /// Records the parser emitted but the filter dropped.
    pub filtered_out: usize,
}

/// A transcript that could not be converted.
#[derive(Debug)]
pub struct FileFailure {
    /// Transcript that failed.
    pub input: PathBuf,
    /// Why it failed.
    pub error: LinepackError,
}

/// Outcome of a whole batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully converted files, in input order.
    pub files: Vec<FileReport>,
    /// Files that failed, in input order.
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    /// Records written across all files.
    pub fn total_messages(&self) -> usize {
        self.files.iter().map(|f| f.emitted).sum()
    }

    /// Records excluded across all files.
    pub fn total_excluded(&self) -> usize {
        self.files.iter().map(|f| f.excluded).sum()
    }

    /// Returns `true` if any file failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Lists the `*.txt` files directly inside `dir`, sorted by name.
///
/// # Errors
///
/// Fails if `dir` does not exist or cannot be read.
pub fn collect_inputs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(LinepackError::file(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "input directory not found"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| LinepackError::file(dir, e.into()))?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext == INPUT_EXTENSION)
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Expands a mix of files and directories into a list of transcripts.
///
/// Directories contribute their `*.txt` files; files are taken as given.
pub fn resolve_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(collect_inputs(input)?);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(LinepackError::file(
                input,
                std::io::Error::new(std::io::ErrorKind::NotFound, "input not found"),
            ));
        }
    }
    Ok(files)
}

/// Returns `<output_dir>/<stem>.<ext>` for a transcript.
pub fn output_path(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let mut name = input
        .file_stem()
        .unwrap_or(input.as_os_str())
        .to_os_string();
    name.push(".");
    name.push(format.extension());
    output_dir.join(name)
}

/// Converts one transcript into `output_dir`.
pub fn convert_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &BatchOptions,
) -> Result<FileReport> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    // Open the input first so a bad input never truncates an earlier output.
    let parser = LineParser::with_config(options.config.clone());
    let mut stream = parser.stream(input)?;

    fs::create_dir_all(output_dir).map_err(|e| LinepackError::file(output_dir, e))?;
    let output = output_path(input, output_dir, options.format);
    let file = File::create(&output).map_err(|e| LinepackError::file(&output, e))?;

    let mut sink = FilteredSink {
        inner: options.format.sink(BufWriter::new(file))?,
        filter: &options.filter,
        written: 0,
        filtered_out: 0,
    };

    for record in stream.by_ref() {
        sink.write_record(&record?)?;
    }
    sink.finish()?;
    let stats = stream.stats();

    info!(
        input = %input.display(),
        output = %output.display(),
        emitted = sink.written,
        excluded = stats.excluded,
        "file converted"
    );

    Ok(FileReport {
        input: input.to_path_buf(),
        output,
        emitted: sink.written,
        excluded: stats.excluded,
        filtered_out: sink.filtered_out,
    })
}

/// Progress notifications from [`convert_all_with`].
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    /// About to convert this transcript.
    Started(&'a Path),
    /// The transcript was converted.
    Converted(&'a FileReport),
    /// The transcript failed; the batch continues.
    Failed(&'a FileFailure),
}

/// Converts every input, continuing past failures.
pub fn convert_all(
    inputs: &[PathBuf],
    output_dir: impl AsRef<Path>,
    options: &BatchOptions,
) -> BatchReport {
    convert_all_with(inputs, output_dir, options, |_| {})
}

/// Same as [`convert_all`], reporting each step to `on_event` as it happens.
pub fn convert_all_with<F>(
    inputs: &[PathBuf],
    output_dir: impl AsRef<Path>,
    options: &BatchOptions,
    mut on_event: F,
) -> BatchReport
where
    F: FnMut(BatchEvent<'_>),
{
    let output_dir = output_dir.as_ref();
    let mut report = BatchReport::default();

    for input in inputs {
        on_event(BatchEvent::Started(input));
        match convert_file(input, output_dir, options) {
            Ok(file) => {
                on_event(BatchEvent::Converted(&file));
                report.files.push(file);
            }
            Err(error) => {
                warn!(input = %input.display(), %error, "conversion failed");
                let failure = FileFailure {
                    input: input.clone(),
                    error,
                };
                on_event(BatchEvent::Failed(&failure));
                report.failures.push(failure);
            }
        }
    }

    report
}

/// Applies a [`FilterConfig`] in front of another sink.
struct FilteredSink<'a, S: RecordSink> {
    inner: S,
    filter: &'a FilterConfig,
    written: usize,
    filtered_out: usize,
}

impl<S: RecordSink> RecordSink for FilteredSink<'_, S> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        if self.filter.matches(record) {
            self.written += 1;
            self.inner.write_record(record)
        } else {
            self.filtered_out += 1;
            Ok(())
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.inner.finish()
    }
}
