//! The message record emitted by the transcript parser.
//!
//! A [`Record`] is one reassembled chat message: the calendar context inherited
//! from the last date header, the message's own `HH:MM` time, the sender and
//! the (possibly multi-line) body.
//!
//! # Serialization
//!
//! Records serialize with the fixed keys `date, day, time, user, message`, in
//! that order. An absent date context is written as `null` rather than
//! omitted, so every output line carries all five keys.
//!
//! ```
//! use linepack::Record;
//!
//! let rec = Record::new(Some("2030.01.01"), Some("Wednesday"), "09:00", "Bob", "hello\nthere");
//! let json = serde_json::to_string(&rec)?;
//! assert_eq!(
//!     json,
//!     r#"{"date":"2030.01.01","day":"Wednesday","time":"09:00","user":"Bob","message":"hello\nthere"}"#
//! );
//!
//! let back: Record = serde_json::from_str(&json)?;
//! assert_eq!(back, rec);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by transcript date headers.
pub const DATE_FORMAT: &str = "%Y.%m.%d";

/// A single reassembled chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar date (`YYYY.MM.DD`) of the most recent date header.
    ///
    /// `None` when the message appeared before any date header.
    pub date: Option<String>,

    /// Weekday label of the most recent date header.
    pub day: Option<String>,

    /// `HH:MM` timestamp from the message's own header line.
    pub time: String,

    /// Sender name, or the subject of a system notice.
    pub user: String,

    /// Message body. Continuation lines are joined with `\n`.
    pub message: String,
}

impl Record {
    /// Creates a record from its five fields.
    pub fn new(
        date: Option<impl Into<String>>,
        day: Option<impl Into<String>>,
        time: impl Into<String>,
        user: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            date: date.map(Into::into),
            day: day.map(Into::into),
            time: time.into(),
            user: user.into(),
            message: message.into(),
        }
    }

    /// Returns the date string, if a date header preceded this message.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Returns the weekday label, if a date header preceded this message.
    pub fn day(&self) -> Option<&str> {
        self.day.as_deref()
    }

    /// Returns the `HH:MM` time.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the sender name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Appends a continuation line to the body.
    ///
    /// An empty body takes the line verbatim; otherwise the line is joined
    /// with a single `\n`.
    ///
    /// ```
    /// use linepack::Record;
    ///
    /// let mut rec = Record::new(None::<String>, None::<String>, "10:00", "Alice", "");
    /// rec.append_line("first");
    /// rec.append_line("second");
    /// assert_eq!(rec.message(), "first\nsecond");
    /// ```
    pub fn append_line(&mut self, line: &str) {
        if !self.message.is_empty() {
            self.message.push('\n');
        }
        self.message.push_str(line);
    }

    /// Parses the date header into a calendar date.
    ///
    /// Returns `None` when the record has no date or the date is not a valid
    /// `YYYY.MM.DD` calendar day.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
    }

    /// Returns `true` if the trimmed body is exactly `sentinel`.
    pub fn is_placeholder(&self, sentinel: &str) -> bool {
        self.message.trim() == sentinel
    }
}
