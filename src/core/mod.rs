//! Core processing logic for linepack.
//!
//! This module contains:
//! - [`assembler`] - The line-by-line message reassembly state machine
//! - [`filter`] - Record filtering by date and user
//! - [`output`] - Format writers (JSONL, JSON, CSV)
//!
//! # Quick Start
//!
//! ```rust
//! use linepack::core::{
//!     Assembler, Finalized, ParseStats,
//!     FilterConfig, apply_filters,
//!     RecordSink, JsonlSink, to_jsonl,
//! };
//! ```

pub mod assembler;
pub mod filter;
pub mod output;

pub use assembler::{Assembler, Finalized, ParseStats};
pub use filter::{FilterConfig, apply_filters};

#[cfg(feature = "csv-output")]
pub use output::{CsvSink, to_csv, write_csv};
pub use output::{JsonSink, JsonlSink, RecordSink, to_json, to_jsonl, write_json, write_jsonl};
