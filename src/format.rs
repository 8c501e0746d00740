//! Output format selection.
//!
//! These types don't depend on the CLI, so library callers can pick a format
//! by name or by file extension and get a matching writer or [`RecordSink`].
//!
//! # Example
//!
//! ```rust,no_run
//! # fn example() -> linepack::Result<()> {
//! use linepack::format::{OutputFormat, write_to_format};
//! use linepack::Record;
//!
//! let records = vec![
//!     Record::new(Some("2030.01.01"), Some("Wednesday"), "09:00", "Bob", "hello"),
//! ];
//!
//! // Write using format enum
//! write_to_format(&records, "output.jsonl", OutputFormat::Jsonl)?;
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("output.json")?;
//! assert_eq!(format, OutputFormat::Json);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Record;
use crate::core::output::{JsonSink, JsonlSink, RecordSink};
use crate::error::LinepackError;

/// Output format for parsed transcripts.
///
/// - [`Jsonl`](OutputFormat::Jsonl) - One JSON object per line (default)
/// - [`Json`](OutputFormat::Json) - Pretty JSON array
/// - [`Csv`](OutputFormat::Csv) - Header plus one row per record
///
/// # Example
///
/// ```rust
/// use linepack::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// JSON Lines, also known as NDJSON.
    #[default]
    Jsonl,

    /// JSON array of records.
    Json,

    /// Comma-separated values (requires the `csv-output` feature).
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// ```rust
    /// use linepack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
    /// assert_eq!(OutputFormat::Json.extension(), "json");
    /// assert_eq!(OutputFormat::Csv.extension(), "csv");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["jsonl", "ndjson", "json", "csv"]
    }

    /// Returns all formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Jsonl, OutputFormat::Json, OutputFormat::Csv]
    }

    /// Detects format from a file path based on extension.
    ///
    /// ```rust
    /// use linepack::format::OutputFormat;
    ///
    /// let format = OutputFormat::from_path("out/chat.ndjson").unwrap();
    /// assert_eq!(format, OutputFormat::Jsonl);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LinepackError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(LinepackError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: jsonl, json, csv"),
            )),
        }
    }

    /// Creates a streaming sink for this format over `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`LinepackError::InvalidFormat`] for CSV when the `csv-output`
    /// feature is disabled.
    pub fn sink<'w, W: Write + 'w>(
        self,
        writer: W,
    ) -> Result<Box<dyn RecordSink + 'w>, LinepackError> {
        match self {
            OutputFormat::Jsonl => Ok(Box::new(JsonlSink::new(writer))),
            OutputFormat::Json => Ok(Box::new(JsonSink::new(writer))),
            #[cfg(feature = "csv-output")]
            OutputFormat::Csv => Ok(Box::new(crate::core::output::CsvSink::new(writer))),
            #[cfg(not(feature = "csv-output"))]
            OutputFormat::Csv => Err(csv_disabled()),
        }
    }
}

#[cfg(not(feature = "csv-output"))]
fn csv_disabled() -> LinepackError {
    LinepackError::invalid_format(
        "output",
        "Output format CSV requires the 'csv-output' feature to be enabled",
    )
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes records to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
pub fn write_to_format(
    records: &[Record],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), LinepackError> {
    match format {
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path),
        OutputFormat::Json => crate::core::output::write_json(records, path),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path),
        #[cfg(not(feature = "csv-output"))]
        OutputFormat::Csv => Err(csv_disabled()),
    }
}

/// Converts records to a string in the specified format.
///
/// ```rust
/// # fn example() -> linepack::Result<()> {
/// use linepack::format::{OutputFormat, to_format_string};
/// use linepack::Record;
///
/// let records = vec![Record::new(None::<String>, None::<String>, "09:00", "Bob", "hi")];
/// let jsonl = to_format_string(&records, OutputFormat::Jsonl)?;
/// assert!(jsonl.ends_with('\n'));
/// # Ok(())
/// # }
/// ```
pub fn to_format_string(records: &[Record], format: OutputFormat) -> Result<String, LinepackError> {
    match format {
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records),
        OutputFormat::Json => crate::core::output::to_json(records),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records),
        #[cfg(not(feature = "csv-output"))]
        OutputFormat::Csv => Err(csv_disabled()),
    }
}
