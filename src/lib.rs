//! # linepack
//!
//! A Rust library for turning LINE talk history exports into structured
//! records, one JSON object per message.
//!
//! ## Overview
//!
//! A LINE export is plain text with no delimiters beyond layout: date headers,
//! `HH:MM` message headers, multi-line bodies, and system notices glued to the
//! sender's name. linepack walks the lines with a small state machine and
//! rebuilds each message as a [`Record`]:
//!
//! ```text
//! 2030.01.01 Wednesday        -> date context
//! 09:00 Bob hello             -> new record
//! there                       -> continuation
//! 09:05 Bob Image             -> new record, dropped as a media placeholder
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use linepack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parser = LineParser::with_config(LineConfig::english());
//!     let parsed = parser.parse_str(
//!         "2030.01.01 Wednesday\n09:00 Bob hello\nthere\n09:05 Bob Image\n",
//!     )?;
//!
//!     assert_eq!(parsed.records.len(), 1);
//!     assert_eq!(parsed.excluded_count(), 1);
//!
//!     let jsonl = to_jsonl(&parsed.records)?;
//!     assert!(jsonl.starts_with(r#"{"date":"2030.01.01","day":"Wednesday""#));
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming for Large Files
//!
//! ```rust,no_run
//! use linepack::prelude::*;
//!
//! let parser = LineParser::new();
//! for record in parser.stream("talk.txt")? {
//!     let record = record?;
//!     println!("{} {}: {}", record.time(), record.user(), record.message());
//! }
//! # Ok::<(), linepack::LinepackError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`record`] - [`Record`], the unit of output
//! - [`config`] - [`LineConfig`](config::LineConfig), every tunable heuristic
//! - [`parsing`] - Single-line classification and splitting
//! - [`core`] - The reassembly state machine, filters and output writers
//!   - [`core::assembler`] - [`Assembler`](core::Assembler), [`ParseStats`](core::ParseStats)
//!   - [`core::filter`] - [`FilterConfig`](core::FilterConfig), [`apply_filters`](core::apply_filters)
//!   - [`core::output`] - [`RecordSink`](core::RecordSink), JSONL/JSON/CSV writers
//! - [`parser`] - [`LineParser`](parser::LineParser), the main entry point
//! - [`streaming`] - [`RecordStream`](streaming::RecordStream) for large files
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`batch`] - Directory conversion with per-file reports
//! - `cli` - CLI argument types (feature `cli`)
//! - [`error`] - Unified error types ([`LinepackError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsing;
pub mod record;
pub mod streaming;

// Re-export the main types at the crate root for convenience
pub use error::{LinepackError, Result};
pub use record::Record;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use linepack::prelude::*;
/// ```
pub mod prelude {
    // Core record type
    pub use crate::Record;

    // Error types
    pub use crate::error::{LinepackError, Result};

    // Parser and configuration
    pub use crate::config::LineConfig;
    pub use crate::parser::{LineParser, Parsed};

    // State machine
    pub use crate::core::assembler::{Assembler, Finalized, ParseStats};

    // Filtering
    pub use crate::core::filter::{FilterConfig, apply_filters};

    // Output (sinks, file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{CsvSink, to_csv, write_csv};
    pub use crate::core::output::{
        JsonSink, JsonlSink, RecordSink, to_json, to_jsonl, write_json, write_jsonl,
    };
    pub use crate::format::OutputFormat;

    // Streaming
    pub use crate::streaming::{RecordIterator, RecordStream};
}
