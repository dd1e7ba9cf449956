//! Knowledge base: question/answer entries persisted as one JSON file
//!
//! File layout:
//! ```text
//! {
//!   "version": 1,
//!   "questions": [
//!     { "question": "hi", "answer": "hello" },
//!     ...
//!   ]
//! }
//! ```
//!
//! The whole file is read at startup and rewritten after every append.

pub mod store;
pub mod types;

pub use store::{append, load, save, KnowledgeStore};
pub use types::{Entry, KnowledgeBase, SCHEMA_VERSION};
