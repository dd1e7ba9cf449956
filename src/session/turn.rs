//! Turn state machine for a conversation
//!
//! ```text
//!            submit                 teach
//!   Idle ─────────────┬─► Unknown ─────────► Learned ─┐
//!    ▲                │      │ decline                │
//!    │                │      ▼                        │
//!    │                │    Idle                       │
//!    │                └─► Answered ───────────────────┤
//!    └────────────────────────── next submit ◄────────┘
//! ```

use crate::error::{Error, Result, StorageError};
use crate::session::chat::{AskOutcome, ChatSession};

/// Where the conversation is within a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for a question
    Idle,
    /// Last question was answered from the knowledge base
    Answered,
    /// Last question had no match; an answer may be taught for it
    Unknown { question: String },
    /// An answer was just learned
    Learned,
}

/// Outcome of teaching the pending question
#[derive(Debug)]
pub enum TeachOutcome {
    /// Learned and saved
    Learned,
    /// Learned in memory, but the knowledge file could not be written
    LearnedUnsaved(StorageError),
}

/// Drives [`ChatSession`] through ask / teach / decline turns
#[derive(Debug)]
pub struct Conversation {
    session: ChatSession,
    state: TurnState,
}

impl Conversation {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            state: TurnState::Idle,
        }
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Ask a question, starting a new turn.
    ///
    /// Not allowed while a previous unknown question is still pending.
    pub fn submit(&mut self, question: &str) -> Result<AskOutcome> {
        self.finish();
        if let TurnState::Unknown { question: pending } = &self.state {
            return Err(Error::InvalidState(format!(
                "question {:?} is waiting for teach or decline",
                pending
            )));
        }

        let outcome = self.session.ask(question);
        self.state = if outcome.is_unknown() {
            TurnState::Unknown {
                question: question.to_string(),
            }
        } else {
            TurnState::Answered
        };
        Ok(outcome)
    }

    /// Teach `answer` for the pending unknown question.
    ///
    /// A failed save still completes the turn; the entry stays in memory.
    pub fn teach(&mut self, answer: &str) -> Result<TeachOutcome> {
        let question = match &self.state {
            TurnState::Unknown { question } => question.clone(),
            other => {
                return Err(Error::InvalidState(format!(
                    "nothing to teach in state {:?}",
                    other
                )))
            }
        };
        if answer.trim().is_empty() {
            return Err(Error::InvalidEntry("answer must not be empty".to_string()));
        }

        let outcome = match self.session.teach(&question, answer) {
            Ok(()) => TeachOutcome::Learned,
            Err(Error::Storage(e)) => TeachOutcome::LearnedUnsaved(e),
            Err(e) => return Err(e),
        };
        self.state = TurnState::Learned;
        Ok(outcome)
    }

    /// Give up on the pending unknown question
    pub fn decline(&mut self) -> Result<()> {
        if !matches!(self.state, TurnState::Unknown { .. }) {
            return Err(Error::InvalidState(format!(
                "nothing to decline in state {:?}",
                self.state
            )));
        }
        self.state = TurnState::Idle;
        Ok(())
    }

    /// Close an answered or learned turn
    pub fn finish(&mut self) {
        if matches!(self.state, TurnState::Answered | TurnState::Learned) {
            self.state = TurnState::Idle;
        }
    }
}
