//! Filter records by date range and user.
//!
//! Filtering runs after parsing. It never changes the parser's excluded
//! count: a record dropped here was emitted by the parser and then narrowed
//! away by the caller.
//!
//! # Examples
//!
//! ```
//! use linepack::core::filter::{FilterConfig, apply_filters};
//! use linepack::Record;
//!
//! # fn main() -> linepack::Result<()> {
//! let records = vec![
//!     Record::new(Some("2026.01.09"), Some("金曜日"), "10:00", "ロキシー", "old"),
//!     Record::new(Some("2026.02.01"), Some("日曜日"), "10:00", "ロキシー", "new"),
//!     Record::new(Some("2026.02.01"), Some("日曜日"), "10:05", "ユキ", "hi"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2026-02-01")?
//!     .with_user("ロキシー");
//!
//! let filtered = apply_filters(records, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].message(), "new");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Date bounds are inclusive and compare calendar days only
//! - Records without a parsable date are **excluded** when date filters are active
//! - User matching is exact after trimming surrounding whitespace
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;

use crate::Record;
use crate::error::LinepackError;

/// Configuration for filtering records by date and user.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only records on or after this day.
    pub after: Option<NaiveDate>,

    /// Include only records on or before this day.
    pub before: Option<NaiveDate>,

    /// Include only records from this user.
    pub user: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive), `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`LinepackError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, LinepackError> {
        self.after = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive), `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`LinepackError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, LinepackError> {
        self.before = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the user filter.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.user.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(ref user) = self.user {
            if record.user().trim() != user.trim() {
                return false;
            }
        }

        if self.has_date_filter() {
            let Some(date) = record.naive_date() else {
                return false;
            };
            if self.after.is_some_and(|after| date < after) {
                return false;
            }
            if self.before.is_some_and(|before| date > before) {
                return false;
            }
        }

        true
    }
}

fn parse_filter_date(date_str: &str) -> Result<NaiveDate, LinepackError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| LinepackError::invalid_date(date_str))
}

/// Filters records, keeping only those that match all active filters.
///
/// If no filters are active, returns the input unchanged.
pub fn apply_filters(records: Vec<Record>, config: &FilterConfig) -> Vec<Record> {
    if !config.is_active() {
        return records;
    }

    records.into_iter().filter(|r| config.matches(r)).collect()
}
