//! Parser configuration.
//!
//! Every heuristic the line classifier relies on lives in [`LineConfig`]:
//! the weekday suffix that marks a date header, the body keywords that turn a
//! timestamped line into a continuation, the system-action phrases that are
//! glued to a username, and the media placeholder that gets a record dropped.
//!
//! Nothing here is a hidden constant. Configs can be built in code, loaded from
//! JSON, or taken from one of the presets.
//!
//! # Example
//!
//! ```rust
//! use linepack::config::LineConfig;
//! use linepack::parser::LineParser;
//!
//! let config = LineConfig::japanese()
//!     .with_body_keyword("受付")
//!     .with_buffer_size(128 * 1024);
//!
//! let parser = LineParser::with_config(config);
//! ```
//!
//! # Loading from JSON
//!
//! Missing fields fall back to the Japanese defaults:
//!
//! ```rust
//! use linepack::config::LineConfig;
//!
//! let config = LineConfig::from_json_str(r#"{"media_placeholder": "[写真]"}"#)?;
//! assert_eq!(config.media_placeholder, "[写真]");
//! assert_eq!(config.weekday_suffix, "曜日");
//! # Ok::<(), linepack::LinepackError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LinepackError;

/// Tunable heuristics for LINE talk history parsing.
///
/// # Keyword continuation trade-off
///
/// A timestamped line whose first token starts with one of
/// [`body_keywords`](Self::body_keywords) is folded into the previous message
/// instead of starting a new one. Schedules pasted into a chat
/// (`19:00 開演`) look exactly like message headers otherwise. The price is
/// that a real user whose name starts with a keyword is misread as a
/// continuation, and a pasted schedule line starting with an unlisted word is
/// misread as a new message. Tune the list per transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Suffix the weekday token of a date header must end with (default: `曜日`).
    pub weekday_suffix: String,

    /// Words that open message bodies rather than usernames.
    pub body_keywords: Vec<String>,

    /// Platform notices glued directly to the username, checked in order.
    pub system_actions: Vec<String>,

    /// Trimmed body that marks a media-only message to drop (default: `画像`).
    pub media_placeholder: String,

    /// Read buffer size for file input (default: 64KB).
    pub buffer_size: usize,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            weekday_suffix: "曜日".to_string(),
            body_keywords: to_strings(&[
                "開演", "開場", "終", "開始", "終了", "開催", "中止", "延期",
            ]),
            system_actions: to_strings(&[
                "がメッセージの送信を取り消しました",
                "がアルバムに写真を追加しました",
                "がノートを作成しました",
                "が通話をかけました",
                "が退出しました",
                "が参加しました",
            ]),
            media_placeholder: "画像".to_string(),
            buffer_size: 64 * 1024, // 64KB
        }
    }
}

impl LineConfig {
    /// Creates a configuration with the Japanese defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for Japanese-locale exports (same as [`Default`]).
    pub fn japanese() -> Self {
        Self::default()
    }

    /// Preset for English-locale exports.
    ///
    /// Date headers look like `2030.01.01 Wednesday`.
    pub fn english() -> Self {
        Self {
            weekday_suffix: "day".to_string(),
            body_keywords: to_strings(&[
                "start",
                "end",
                "began",
                "doors",
                "curtain",
                "held",
                "postponed",
                "cancelled",
            ]),
            system_actions: to_strings(&[
                "withdrew a message",
                "added photos to an album",
                "created a note",
                "placed a call",
                "left",
                "joined",
            ]),
            media_placeholder: "Image".to_string(),
            ..Self::default()
        }
    }

    /// Sets the weekday suffix.
    #[must_use]
    pub fn with_weekday_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.weekday_suffix = suffix.into();
        self
    }

    /// Replaces the body keyword list.
    #[must_use]
    pub fn with_body_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one body keyword.
    #[must_use]
    pub fn with_body_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.body_keywords.push(keyword.into());
        self
    }

    /// Replaces the system-action phrase list.
    #[must_use]
    pub fn with_system_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the media placeholder sentinel.
    #[must_use]
    pub fn with_media_placeholder(mut self, sentinel: impl Into<String>) -> Self {
        self.media_placeholder = sentinel.into();
        self
    }

    /// Sets the read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Parses a JSON config document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, LinepackError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LinepackError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| LinepackError::file(path, e))?;
        Self::from_json_str(&json)
    }

    /// Checks that the configuration can drive a parser.
    ///
    /// An empty keyword would match every token, and an empty action phrase
    /// would match every line, so both are rejected.
    pub fn validate(&self) -> Result<(), LinepackError> {
        if self.weekday_suffix.is_empty() {
            return Err(LinepackError::invalid_config(
                "weekday_suffix",
                "must not be empty",
            ));
        }
        if self.media_placeholder.trim().is_empty() {
            return Err(LinepackError::invalid_config(
                "media_placeholder",
                "must not be blank",
            ));
        }
        if self.body_keywords.iter().any(String::is_empty) {
            return Err(LinepackError::invalid_config(
                "body_keywords",
                "entries must not be empty",
            ));
        }
        if self.system_actions.iter().any(String::is_empty) {
            return Err(LinepackError::invalid_config(
                "system_actions",
                "entries must not be empty",
            ));
        }
        if self.buffer_size == 0 {
            return Err(LinepackError::invalid_config(
                "buffer_size",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
