//! LearnBot - question/answer chat assistant that learns on a miss
//!
//! LearnBot answers a typed question with the stored answer of the closest
//! known question, and lets the user teach it a new answer when nothing is
//! close enough.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            Presentation (CLI / repl / any UI)            │
//! │          ask(question)          teach(q, answer)         │
//! └──────────────┬──────────────────────────┬────────────────┘
//!                │                          │
//! ┌──────────────▼──────────────────────────▼────────────────┐
//! │                ChatSession / Conversation                │
//! └──────────────┬──────────────────────────┬────────────────┘
//!                │ known questions          │ append + save
//! ┌──────────────▼─────────────┐  ┌─────────▼────────────────┐
//! │        MatchEngine         │  │      KnowledgeStore      │
//! │  gestalt similarity ratio  │  │  knowledge_base.json     │
//! │  best match >= cutoff      │  │  load / save / append    │
//! └────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`knowledge`]: entries, JSON load/save, the owning store
//! - [`matching`]: similarity ratio and best-match lookup
//! - [`session`]: `ask` / `teach` and the per-turn state machine
//! - [`repl`]: terminal chat loop
//! - [`config`]: configuration management

pub mod config;
pub mod error;
pub mod knowledge;
pub mod matching;
pub mod repl;
pub mod session;

pub use config::LearnBotConfig;
pub use error::{Error, Result, StorageError};
pub use knowledge::{Entry, KnowledgeBase, KnowledgeStore};
pub use matching::MatchEngine;
pub use session::{AskOutcome, ChatSession, Conversation};
