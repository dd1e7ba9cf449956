//! Chat session: the two boundary operations over one knowledge store

use crate::config::LearnBotConfig;
use crate::error::{Error, Result};
use crate::knowledge::{Entry, KnowledgeStore};
use crate::matching::{MatchEngine, ScoredMatch};
use serde::{Deserialize, Serialize};

/// Result of asking a question.
///
/// Serializes as `{"answer": "..."}` or `{"unknown": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AskOutcome {
    Answer { answer: String },
    Unknown { unknown: bool },
}

impl AskOutcome {
    pub fn answer(answer: impl Into<String>) -> Self {
        Self::Answer {
            answer: answer.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::Unknown { unknown: true }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }

    /// The answer text, if one was found
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Answer { answer } => Some(answer),
            Self::Unknown { .. } => None,
        }
    }
}

/// Wire form of a teach result: `{"ok": true}` or `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeachReport {
    Ok { ok: bool },
    Error { error: String },
}

impl From<&Result<()>> for TeachReport {
    fn from(result: &Result<()>) -> Self {
        match result {
            Ok(()) => Self::Ok { ok: true },
            Err(e) => Self::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Owns the knowledge store and the matcher for one process
#[derive(Debug)]
pub struct ChatSession {
    store: KnowledgeStore,
    engine: MatchEngine,
    max_suggestions: usize,
}

impl ChatSession {
    pub fn new(store: KnowledgeStore, engine: MatchEngine) -> Self {
        Self {
            store,
            engine,
            max_suggestions: crate::config::MatchingConfig::default().max_suggestions,
        }
    }

    /// Load the knowledge base and build the matcher from `config`
    pub fn open(config: &LearnBotConfig) -> Result<Self> {
        let store = KnowledgeStore::open(&config.knowledge)?;
        let engine = MatchEngine::new(config.matching.cutoff)?;
        Ok(Self {
            store,
            engine,
            max_suggestions: config.matching.max_suggestions,
        })
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Answer of the closest known question, or unknown
    pub fn ask(&self, question: &str) -> AskOutcome {
        let questions = self.store.questions();
        let answer = self
            .engine
            .find_best_match(question, &questions)
            .and_then(|best| self.store.answer_for(best));

        match answer {
            Some(answer) => AskOutcome::answer(answer),
            None => AskOutcome::unknown(),
        }
    }

    /// Store a new question/answer pair and persist the knowledge base.
    ///
    /// On `Error::Storage` the pair is still answerable for the rest of the
    /// process; only the file is out of date.
    pub fn teach(&mut self, question: &str, answer: &str) -> Result<()> {
        if question.trim().is_empty() {
            return Err(Error::InvalidEntry("question must not be empty".to_string()));
        }
        if answer.trim().is_empty() {
            tracing::warn!("Teaching an empty answer for {:?}", question);
        }

        self.store.learn(Entry::new(question, answer))?;
        Ok(())
    }

    /// Closest known questions with their scores, best first
    pub fn suggestions(&self, question: &str) -> Vec<ScoredMatch<'_>> {
        let entries = self.store.knowledge().entries();
        let questions: Vec<&str> = entries.iter().map(|e| e.question.as_str()).collect();
        self.engine
            .close_matches(question, &questions, self.max_suggestions)
            .into_iter()
            .map(|m| ScoredMatch {
                question: entries[m.index].question.as_str(),
                index: m.index,
                score: m.score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KnowledgeConfig;
    use crate::knowledge::{load, KnowledgeBase};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn session_with(dir: &TempDir, json: &str) -> (ChatSession, PathBuf) {
        let path = dir.path().join("knowledge_base.json");
        std::fs::write(&path, json).unwrap();
        let mut config = LearnBotConfig::default();
        config.knowledge = KnowledgeConfig {
            path: path.clone(),
            ..KnowledgeConfig::default()
        };
        (ChatSession::open(&config).unwrap(), path)
    }

    const HI: &str = r#"{"questions":[{"question":"hi","answer":"hello"}]}"#;

    #[test]
    fn test_ask_scenarios() {
        let dir = TempDir::new().unwrap();
        let (session, _) = session_with(&dir, HI);

        assert_eq!(session.ask("hi"), AskOutcome::answer("hello"));
        assert_eq!(session.ask("hii"), AskOutcome::answer("hello"));
        assert_eq!(session.ask("goodbye"), AskOutcome::unknown());
    }

    #[test]
    fn test_ask_empty_base() {
        let dir = TempDir::new().unwrap();
        let (session, _) = session_with(&dir, r#"{"questions":[]}"#);
        assert!(session.ask("hi").is_unknown());
        assert!(session.ask("").is_unknown());
    }

    #[test]
    fn test_ask_duplicate_question_returns_first_answer() {
        let dir = TempDir::new().unwrap();
        let (session, _) = session_with(
            &dir,
            r#"{"questions":[{"question":"hi","answer":"first"},{"question":"hi","answer":"second"}]}"#,
        );
        assert_eq!(session.ask("hi").text(), Some("first"));
    }

    #[test]
    fn test_teach_then_ask() {
        let dir = TempDir::new().unwrap();
        let (mut session, path) = session_with(&dir, HI);

        assert!(session.ask("what is rust?").is_unknown());
        session.teach("what is rust?", "a language").unwrap();

        assert_eq!(session.ask("what is rust?").text(), Some("a language"));
        assert_eq!(
            session.store().answer_for("what is rust?"),
            Some("a language")
        );
        assert_eq!(load(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_teach_twice_keeps_both() {
        let dir = TempDir::new().unwrap();
        let (mut session, path) = session_with(&dir, HI);

        session.teach("q", "a").unwrap();
        session.teach("q", "a").unwrap();

        let kb = load(&path).unwrap();
        assert_eq!(kb.len(), 3);
        assert_eq!(kb.questions(), vec!["hi", "q", "q"]);
    }

    #[test]
    fn test_teach_rejects_empty_question() {
        let dir = TempDir::new().unwrap();
        let (mut session, _) = session_with(&dir, HI);
        assert!(matches!(
            session.teach("   ", "a"),
            Err(Error::InvalidEntry(_))
        ));
        assert_eq!(session.store().knowledge().len(), 1);
    }

    #[test]
    fn test_teach_save_failure_is_recoverable() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = KnowledgeStore::with_base(
            blocker.join("kb.json"),
            KnowledgeBase::default(),
            true,
        );
        let mut session = ChatSession::new(store, MatchEngine::default());

        let result = session.teach("hi", "hello");
        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(session.ask("hi").text(), Some("hello"));

        match TeachReport::from(&result) {
            TeachReport::Error { error } => assert!(error.contains("failed to write")),
            other => panic!("unexpected report {:?}", other),
        }
    }

    #[test]
    fn test_suggestions_ranked() {
        let dir = TempDir::new().unwrap();
        let (session, _) = session_with(
            &dir,
            r#"{"questions":[
                {"question":"what is your name","answer":"LearnBot"},
                {"question":"what time is it","answer":"no idea"},
                {"question":"what is your game","answer":"chess"}
            ]}"#,
        );

        let suggestions = session.suggestions("what is your name?");
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].question, "what is your name");
        assert_eq!(suggestions[1].question, "what is your game");
        assert!(suggestions[0].score > suggestions[1].score);
    }

    #[test]
    fn test_outcome_wire_format() {
        assert_eq!(
            serde_json::to_string(&AskOutcome::answer("hello")).unwrap(),
            r#"{"answer":"hello"}"#
        );
        assert_eq!(
            serde_json::to_string(&AskOutcome::unknown()).unwrap(),
            r#"{"unknown":true}"#
        );
        assert_eq!(
            serde_json::to_string(&TeachReport::from(&Ok::<(), Error>(()))).unwrap(),
            r#"{"ok":true}"#
        );
    }
}
