//! Chat session over the knowledge base
//!
//! [`ChatSession`] exposes the two boundary operations (`ask`, `teach`);
//! [`Conversation`] layers the per-turn state machine on top so a
//! presentation layer can drive the "unknown, then teach or decline" prompts.

pub mod chat;
pub mod turn;

pub use chat::{AskOutcome, ChatSession, TeachReport};
pub use turn::{Conversation, TeachOutcome, TurnState};

/// Sentinel input that ends a session
pub const QUIT_WORD: &str = "quit";

/// Whether `input` is the end-of-session sentinel (case-insensitive)
pub fn is_quit(input: &str) -> bool {
    input.trim().to_lowercase() == QUIT_WORD
}
