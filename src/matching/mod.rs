//! Approximate question matching
//!
//! - [`ratio`]: gestalt pattern matching similarity between two strings
//! - [`engine`]: best match over the known questions at a fixed cutoff

pub mod engine;
pub mod ratio;

pub use engine::{MatchEngine, ScoredMatch};
pub use ratio::{ratio, SequenceMatcher};
