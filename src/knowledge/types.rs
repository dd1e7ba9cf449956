//! Knowledge base data types

use serde::{Deserialize, Serialize};

/// Highest schema version this build reads and the one it writes
pub const SCHEMA_VERSION: u32 = 1;

/// One stored question/answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub question: String,
    pub answer: String,
}

impl Entry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered collection of entries, insertion order preserved
///
/// Duplicate questions are allowed; lookups return the first one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Schema version; files without one are treated as version 1
    #[serde(default = "default_version")]
    pub version: u32,

    /// Entries in insertion order
    pub questions: Vec<Entry>,
}

fn default_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            questions: Vec::new(),
        }
    }
}

impl KnowledgeBase {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            questions: entries,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Snapshot of all question texts, in order
    pub fn questions(&self) -> Vec<&str> {
        self.questions.iter().map(|e| e.question.as_str()).collect()
    }

    /// Answer of the first entry whose question equals `question` exactly
    pub fn answer_for(&self, question: &str) -> Option<&str> {
        self.questions
            .iter()
            .find(|e| e.question == question)
            .map(|e| e.answer.as_str())
    }

    /// Index of the first entry with an empty question
    pub(crate) fn first_empty_question(&self) -> Option<usize> {
        self.questions.iter().position(|e| e.question.is_empty())
    }
}
