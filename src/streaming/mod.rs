//! Streaming parser for transcripts too large to hold in memory.
//!
//! [`RecordStream`] reads one physical line at a time and yields each record
//! as soon as the next header line finalizes it. Only the in-flight message is
//! ever buffered.
//!
//! # Example
//!
//! ```rust,no_run
//! use linepack::config::LineConfig;
//! use linepack::streaming::RecordStream;
//!
//! let stream = RecordStream::open("talk.txt", &LineConfig::default()).unwrap();
//!
//! for result in stream {
//!     match result {
//!         Ok(record) => println!("{} {}: {}", record.time(), record.user(), record.message()),
//!         Err(e) => eprintln!("Read failed: {}", e),
//!     }
//! }
//! ```
//!
//! # Memory Usage
//!
//! | Approach | 1GB File |
//! |----------|----------|
//! | [`LineParser::parse`](crate::parser::LineParser::parse) | every record in RAM |
//! | [`RecordStream`] | one message plus the read buffer |

mod traits;
mod transcript;

pub use traits::RecordIterator;
pub use transcript::RecordStream;
