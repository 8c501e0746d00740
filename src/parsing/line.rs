//! Line classification primitives for LINE talk history exports.
//!
//! A LINE export looks like this:
//!
//! ```text
//! 2026.01.09 金曜日
//! 01:54 ロキシー こんばんは
//! 明日の予定は？
//! 01:55 ユキ 19:00 開演です
//! 19:00 開演
//! 01:56 ユキがメッセージの送信を取り消しました
//! ```
//!
//! There are no delimiters beyond layout: a date header, timestamped message
//! headers, and everything else. This module only answers "what does this one
//! line look like". Deciding what to do with it is the assembler's job.

use regex::Regex;

use crate::config::LineConfig;
use crate::error::LinepackError;

/// Timestamped line: `HH:MM`, whitespace, then at least one character.
const TIMESTAMP_PATTERN: &str = r"^(\d{2}:\d{2})\s+(.+)$";

/// Shape of a single raw transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only; never a continuation or delimiter.
    Blank,
    /// `YYYY.MM.DD <weekday>` header.
    DateHeader {
        /// The `YYYY.MM.DD` part.
        date: &'a str,
        /// The weekday label, ending with the configured suffix.
        day: &'a str,
    },
    /// `HH:MM <rest>` line; may start a message or continue one.
    Timestamped {
        /// The `HH:MM` part.
        time: &'a str,
        /// Everything after the whitespace following the time.
        rest: &'a str,
    },
    /// Anything else.
    Plain,
}

/// Compiled patterns for one configuration.
#[derive(Debug, Clone)]
pub struct LinePatterns {
    date_header: Regex,
    timestamped: Regex,
}

impl LinePatterns {
    /// Compiles the date header and timestamp patterns.
    ///
    /// The weekday suffix is escaped, so any string is accepted.
    pub fn new(config: &LineConfig) -> Result<Self, LinepackError> {
        let date_pattern = format!(
            r"^(\d{{4}}\.\d{{2}}\.\d{{2}})\s+(.+{})$",
            regex::escape(&config.weekday_suffix)
        );
        let date_header = Regex::new(&date_pattern)
            .map_err(|e| LinepackError::invalid_config("weekday_suffix", e.to_string()))?;
        let timestamped = Regex::new(TIMESTAMP_PATTERN)
            .map_err(|e| LinepackError::invalid_config("timestamp pattern", e.to_string()))?;

        Ok(Self {
            date_header,
            timestamped,
        })
    }

    /// Classifies a line (already stripped of its terminator).
    ///
    /// Checks run in priority order: blank, date header, timestamped, plain.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if line.trim().is_empty() {
            return LineKind::Blank;
        }

        if let Some(caps) = self.date_header.captures(line) {
            let date = caps.get(1).map_or("", |m| m.as_str());
            let day = caps.get(2).map_or("", |m| m.as_str());
            return LineKind::DateHeader { date, day };
        }

        if let Some(caps) = self.timestamped.captures(line) {
            let time = caps.get(1).map_or("", |m| m.as_str());
            let rest = caps.get(2).map_or("", |m| m.as_str());
            return LineKind::Timestamped { time, rest };
        }

        LineKind::Plain
    }
}

/// Decides whether the text after a timestamp opens a new message.
///
/// Whitespace-only text is a continuation. So is text whose first token starts
/// with any of `keywords`; everything else is taken as `<username> ...`.
///
/// ```
/// use linepack::parsing::is_message_start;
///
/// let keywords = vec!["開演".to_string()];
/// assert!(is_message_start("ロキシー こんばんは", &keywords));
/// assert!(!is_message_start("開演です", &keywords));
/// assert!(!is_message_start("   ", &keywords));
/// ```
pub fn is_message_start(rest: &str, keywords: &[String]) -> bool {
    let Some(first_word) = rest.split_whitespace().next() else {
        return false;
    };

    !keywords
        .iter()
        .any(|keyword| first_word.starts_with(keyword.as_str()))
}

/// Splits the text after a timestamp into `(user, message)`.
///
/// System notices are glued to the username (`ユキが退出しました`), so the
/// first action phrase found anywhere in the text wins: the user is everything
/// before its first occurrence and the message is the phrase itself. Otherwise
/// the first whitespace run separates user from message.
///
/// ```
/// use linepack::parsing::split_user_message;
///
/// let actions = vec!["left".to_string()];
/// assert_eq!(split_user_message("Aliceleft", &actions), ("Alice", "left"));
/// assert_eq!(split_user_message("Bob hi  there", &actions), ("Bob", "hi  there"));
/// assert_eq!(split_user_message("Bob", &actions), ("Bob", ""));
/// ```
pub fn split_user_message<'a>(rest: &'a str, actions: &'a [String]) -> (&'a str, &'a str) {
    for action in actions {
        if let Some(idx) = rest.find(action.as_str()) {
            return (&rest[..idx], action.as_str());
        }
    }

    let trimmed = rest.trim_start();
    match trimmed.find(char::is_whitespace) {
        Some(idx) => (&trimmed[..idx], trimmed[idx..].trim_start()),
        None => (trimmed, ""),
    }
}

/// Splits one physical chunk (up to and including its `\n`) into lines.
///
/// `\n`, `\r\n` and a lone `\r` all end a line, so a chunk can hold several
/// lines when the export uses bare carriage returns.
///
/// ```
/// use linepack::parsing::split_terminated;
///
/// assert_eq!(split_terminated("abc\r\n").collect::<Vec<_>>(), ["abc"]);
/// assert_eq!(split_terminated("a\rb\rc\n").collect::<Vec<_>>(), ["a", "b", "c"]);
/// assert_eq!(split_terminated("a\r\r\n").collect::<Vec<_>>(), ["a", ""]);
/// ```
pub fn split_terminated(chunk: &str) -> std::str::Split<'_, char> {
    let line = chunk.strip_suffix('\n').unwrap_or(chunk);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.split('\r')
}
