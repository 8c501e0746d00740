//! The message reassembly state machine.
//!
//! [`Assembler`] walks a transcript one line at a time and rebuilds discrete
//! [`Record`]s. It owns exactly one in-flight slot. Every record passes through
//! two phases:
//!
//! 1. [`finalize`](Assembler::finalize) takes the in-flight record out of the
//!    slot and decides whether it is emitted or excluded.
//! 2. [`start`](Assembler::start) creates the next record in the now-empty slot.
//!
//! [`feed`](Assembler::feed) composes the two for each line, and
//! [`finish`](Assembler::finish) flushes the slot at end of input.
//!
//! # Example
//!
//! ```rust
//! use linepack::config::LineConfig;
//! use linepack::core::{Assembler, Finalized};
//!
//! let mut asm = Assembler::new(&LineConfig::english())?;
//! let lines = ["2030.01.01 Wednesday", "09:00 Bob hello", "there", "09:05 Bob Image"];
//!
//! let mut out = Vec::new();
//! for line in lines {
//!     out.extend(asm.feed(line));
//! }
//! out.extend(asm.finish());
//!
//! assert!(matches!(&out[0], Finalized::Emitted(r) if r.message() == "hello\nthere"));
//! assert!(matches!(&out[1], Finalized::Excluded(_)));
//! assert_eq!(asm.stats().excluded, 1);
//! # Ok::<(), linepack::LinepackError>(())
//! ```

use tracing::{debug, trace};

use crate::Record;
use crate::config::LineConfig;
use crate::error::LinepackError;
use crate::parsing::{LineKind, LinePatterns, is_message_start, split_user_message};

/// Outcome of finalizing the in-flight record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finalized {
    /// The record goes to the output sink.
    Emitted(Record),
    /// The record matched the media placeholder and is dropped.
    Excluded(Record),
}

impl Finalized {
    /// Returns the record if it was emitted.
    pub fn into_emitted(self) -> Option<Record> {
        match self {
            Finalized::Emitted(record) => Some(record),
            Finalized::Excluded(_) => None,
        }
    }

    /// Returns `true` for [`Finalized::Excluded`].
    pub fn is_excluded(&self) -> bool {
        matches!(self, Finalized::Excluded(_))
    }
}

/// Counters for one parse run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Message-start events recognized.
    pub started: usize,
    /// Records handed to the output.
    pub emitted: usize,
    /// Records dropped by the media placeholder rule.
    pub excluded: usize,
    /// Continuation lines seen while no record was in flight.
    pub orphan_lines: usize,
    /// Blank lines skipped.
    pub blank_lines: usize,
}

impl ParseStats {
    /// Returns `true` when every started record has been accounted for.
    ///
    /// Only meaningful once the input has been fully consumed.
    pub fn is_conserved(&self) -> bool {
        self.emitted + self.excluded == self.started
    }
}

/// Per-stream parser state.
///
/// One assembler per transcript: the date context and in-flight record must
/// not leak from one file into the next.
#[derive(Debug)]
pub struct Assembler {
    patterns: LinePatterns,
    body_keywords: Vec<String>,
    system_actions: Vec<String>,
    media_placeholder: String,
    current_date: Option<String>,
    current_day: Option<String>,
    current: Option<Record>,
    stats: ParseStats,
}

impl Assembler {
    /// Creates an assembler for the given heuristics.
    ///
    /// # Errors
    ///
    /// Returns [`LinepackError::InvalidConfig`] if `config` fails
    /// [`LineConfig::validate`].
    pub fn new(config: &LineConfig) -> Result<Self, LinepackError> {
        config.validate()?;
        Ok(Self {
            patterns: LinePatterns::new(config)?,
            body_keywords: config.body_keywords.clone(),
            system_actions: config.system_actions.clone(),
            media_placeholder: config.media_placeholder.clone(),
            current_date: None,
            current_day: None,
            current: None,
            stats: ParseStats::default(),
        })
    }

    /// Processes one raw line and returns the record it finalized, if any.
    pub fn feed(&mut self, line: &str) -> Option<Finalized> {
        match self.patterns.classify(line) {
            LineKind::Blank => {
                self.stats.blank_lines += 1;
                None
            }
            LineKind::DateHeader { date, day } => {
                trace!(date, day, "date header");
                let finalized = self.finalize();
                self.current_date = Some(date.to_string());
                self.current_day = Some(day.to_string());
                finalized
            }
            LineKind::Timestamped { time, rest } => {
                if is_message_start(rest, &self.body_keywords) {
                    let finalized = self.finalize();
                    self.start(time, rest);
                    finalized
                } else {
                    trace!(line, "timestamped continuation");
                    self.append(line);
                    None
                }
            }
            LineKind::Plain => {
                self.append(line);
                None
            }
        }
    }

    /// Takes the in-flight record out of the slot and applies the exclusion rule.
    pub fn finalize(&mut self) -> Option<Finalized> {
        let record = self.current.take()?;

        if record.is_placeholder(&self.media_placeholder) {
            self.stats.excluded += 1;
            debug!(
                date = record.date(),
                time = record.time(),
                user = record.user(),
                "excluded media placeholder"
            );
            Some(Finalized::Excluded(record))
        } else {
            self.stats.emitted += 1;
            Some(Finalized::Emitted(record))
        }
    }

    /// Starts a new record from a timestamp and the text that follows it.
    ///
    /// The slot must be empty; call [`finalize`](Self::finalize) first.
    pub fn start(&mut self, time: &str, rest: &str) -> &Record {
        debug_assert!(
            self.current.is_none(),
            "start() called with a record still in flight"
        );

        let (user, message) = split_user_message(rest, &self.system_actions);
        self.stats.started += 1;

        self.current.insert(Record {
            date: self.current_date.clone(),
            day: self.current_day.clone(),
            time: time.to_string(),
            user: user.to_string(),
            message: message.to_string(),
        })
    }

    /// Flushes the in-flight record at end of input.
    pub fn finish(&mut self) -> Option<Finalized> {
        let finalized = self.finalize();
        debug!(
            started = self.stats.started,
            emitted = self.stats.emitted,
            excluded = self.stats.excluded,
            orphan_lines = self.stats.orphan_lines,
            "transcript finished"
        );
        finalized
    }

    /// Returns the counters so far.
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Returns the record currently being assembled.
    pub fn in_flight(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    /// Returns the date of the most recent date header.
    pub fn current_date(&self) -> Option<&str> {
        self.current_date.as_deref()
    }

    /// Returns the weekday of the most recent date header.
    pub fn current_day(&self) -> Option<&str> {
        self.current_day.as_deref()
    }

    fn append(&mut self, line: &str) {
        match self.current.as_mut() {
            Some(record) => record.append_line(line),
            None => {
                self.stats.orphan_lines += 1;
                trace!(line, "dropped line with no message in flight");
            }
        }
    }
}
