//! Progress-reporting iterator trait for streaming parsers.

use crate::Record;
use crate::core::ParseStats;
use crate::error::Result;

/// Iterator over records with progress tracking.
///
/// Extends the standard [`Iterator`] trait with methods for monitoring
/// parsing progress, useful for progress bars and logging.
///
/// # Object Safety
///
/// This trait is object-safe, enabling dynamic dispatch via `Box<dyn RecordIterator>`.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> linepack::Result<()> {
/// use linepack::config::LineConfig;
/// use linepack::streaming::{RecordIterator, RecordStream};
///
/// let mut iter = RecordStream::open("talk.txt", &LineConfig::default())?;
///
/// while let Some(result) = iter.next() {
///     let record = result?;
///
///     if let Some(pct) = iter.progress() {
///         eprintln!("\r{:.1}% {}", pct, record.time());
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub trait RecordIterator: Iterator<Item = Result<Record>> {
    /// Returns approximate progress as a percentage (0.0 to 100.0).
    ///
    /// Returns `None` if progress cannot be determined (e.g., unknown input size).
    fn progress(&self) -> Option<f64> {
        let total = self.total_bytes()?;
        if total == 0 {
            return None;
        }
        Some((self.bytes_processed() as f64 / total as f64) * 100.0)
    }

    /// Returns the number of bytes read so far.
    fn bytes_processed(&self) -> u64;

    /// Returns the total input size in bytes, if known.
    fn total_bytes(&self) -> Option<u64> {
        None
    }

    /// Returns the parse counters so far.
    fn stats(&self) -> ParseStats;
}
