//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Preset`] - Built-in heuristic sets
//! - [`Format`] - Output format options
//!
//! The argument types convert into the library's own configuration, so the
//! binary stays a thin shell over [`batch`](crate::batch):
//!
//! ```rust
//! use clap::Parser;
//! use linepack::cli::Args;
//! use linepack::format::OutputFormat;
//!
//! let args = Args::parse_from(["linepack", "chats", "-f", "json", "--preset", "english"]);
//! let options = args.batch_options()?;
//! assert_eq!(options.format, OutputFormat::Json);
//! assert_eq!(options.config.weekday_suffix, "day");
//! # Ok::<(), linepack::LinepackError>(())
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::batch::BatchOptions;
use crate::config::LineConfig;
use crate::core::filter::FilterConfig;
use crate::error::LinepackError;

/// Convert LINE talk history exports into JSON Lines.
#[derive(Parser, Debug, Clone)]
#[command(name = "linepack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    linepack
    linepack talk.txt -o parsed
    linepack exports/ --preset english -f csv
    linepack targets --after 2026-01-01 --from ロキシー
    linepack targets --config heuristics.json")]
pub struct Args {
    /// Transcript files or directories of *.txt transcripts
    #[arg(value_name = "INPUT", default_value = "targets")]
    pub inputs: Vec<PathBuf>,

    /// Directory for converted files
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "jsonl")]
    pub format: Format,

    /// Built-in heuristics for the export's language
    #[arg(long, value_enum, default_value = "japanese")]
    pub preset: Preset,

    /// JSON file with parser heuristics (replaces --preset)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this user only
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Only print errors and warnings
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Builds the parser configuration from `--config` or `--preset`.
    pub fn line_config(&self) -> Result<LineConfig, LinepackError> {
        match &self.config {
            Some(path) => LineConfig::from_json_file(path),
            None => Ok(self.preset.config()),
        }
    }

    /// Builds the post-parse filter from `--after`, `--before` and `--from`.
    pub fn filter_config(&self) -> Result<FilterConfig, LinepackError> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_user(from.clone());
        }
        Ok(filter)
    }

    /// Collects everything the batch driver needs.
    pub fn batch_options(&self) -> Result<BatchOptions, LinepackError> {
        Ok(BatchOptions {
            config: self.line_config()?,
            format: self.format.into(),
            filter: self.filter_config()?,
        })
    }
}

/// Built-in heuristic sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Japanese-locale exports (`2026.01.09 金曜日`)
    #[default]
    #[value(alias = "ja")]
    Japanese,

    /// English-locale exports (`2030.01.01 Wednesday`)
    #[value(alias = "en")]
    English,
}

impl Preset {
    /// Returns the configuration for this preset.
    pub fn config(self) -> LineConfig {
        match self {
            Preset::Japanese => LineConfig::japanese(),
            Preset::English => LineConfig::english(),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::Japanese => write!(f, "Japanese"),
            Preset::English => write!(f, "English"),
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON Lines - one JSON object per line
    #[default]
    #[value(alias = "ndjson")]
    Jsonl,

    /// JSON array of records
    Json,

    /// CSV with a header row
    Csv,
}

// Conversion to library format type
impl From<Format> for crate::format::OutputFormat {
    fn from(format: Format) -> crate::format::OutputFormat {
        match format {
            Format::Jsonl => crate::format::OutputFormat::Jsonl,
            Format::Json => crate::format::OutputFormat::Json,
            Format::Csv => crate::format::OutputFormat::Csv,
        }
    }
}
