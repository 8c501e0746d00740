//! Shared line-level parsing utilities.
//!
//! These are pure functions over single lines, used by the assembler and
//! exposed for callers who want to test or tune the heuristics directly.

pub mod line;

pub use line::{LineKind, LinePatterns, is_message_start, split_terminated, split_user_message};
