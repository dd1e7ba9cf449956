//! Best-match lookup over the known questions

use crate::config::{validate_cutoff, DEFAULT_CUTOFF};
use crate::error::Result;
use crate::knowledge::KnowledgeBase;
use crate::matching::ratio::SequenceMatcher;
use serde::Serialize;

/// A known question that cleared the cutoff
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch<'a> {
    /// The known question text
    pub question: &'a str,
    /// Position in the known-questions sequence
    pub index: usize,
    /// Similarity ratio in [0, 1]
    pub score: f64,
}

/// Approximate matcher with a fixed similarity cutoff
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine {
    cutoff: f64,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl MatchEngine {
    /// Create an engine; `cutoff` must be within 0.0 and 1.0
    pub fn new(cutoff: f64) -> Result<Self> {
        validate_cutoff(cutoff)?;
        Ok(Self { cutoff })
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Highest-scoring known question with score >= cutoff.
    ///
    /// Ties go to the first occurrence in `known`.
    pub fn find_best_match<'a, S: AsRef<str>>(
        &self,
        candidate: &str,
        known: &'a [S],
    ) -> Option<&'a str> {
        self.close_matches(candidate, known, 1)
            .into_iter()
            .next()
            .map(|m| m.question)
    }

    /// Up to `n` known questions with score >= cutoff, best first.
    ///
    /// Equal scores keep their order in `known`.
    pub fn close_matches<'a, S: AsRef<str>>(
        &self,
        candidate: &str,
        known: &'a [S],
        n: usize,
    ) -> Vec<ScoredMatch<'a>> {
        if n == 0 || known.is_empty() {
            return Vec::new();
        }

        let mut matcher = SequenceMatcher::new(candidate);
        let mut scored: Vec<ScoredMatch<'a>> = Vec::new();
        for (index, question) in known.iter().enumerate() {
            let question = question.as_ref();
            if matcher.real_quick_ratio(question) < self.cutoff
                || matcher.quick_ratio(question) < self.cutoff
            {
                continue;
            }
            let score = matcher.ratio(question);
            if score >= self.cutoff {
                scored.push(ScoredMatch {
                    question,
                    index,
                    score,
                });
            }
        }

        // Stable sort keeps input order among ties
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(n);

        match scored.first() {
            Some(best) => tracing::debug!(
                "Best match for {:?}: {:?} (score {:.3})",
                candidate,
                best.question,
                best.score
            ),
            None => tracing::debug!(
                "No match for {:?} at cutoff {}",
                candidate,
                self.cutoff
            ),
        }
        scored
    }

    /// Answer stored for exactly `question` (case-sensitive)
    pub fn answer_for<'a>(&self, question: &str, kb: &'a KnowledgeBase) -> Option<&'a str> {
        kb.answer_for(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::knowledge::Entry;

    fn engine() -> MatchEngine {
        MatchEngine::default()
    }

    #[test]
    fn test_default_cutoff() {
        assert_eq!(engine().cutoff(), 0.6);
    }

    #[test]
    fn test_new_rejects_bad_cutoff() {
        assert!(matches!(MatchEngine::new(1.01), Err(Error::Config(_))));
        assert!(matches!(MatchEngine::new(-1.0), Err(Error::Config(_))));
        assert!(MatchEngine::new(0.0).is_ok());
    }

    #[test]
    fn test_exact_question_matches() {
        let known = ["hi", "how are you?", "what is your name?"];
        for q in known {
            assert_eq!(engine().find_best_match(q, &known), Some(q));
        }
    }

    #[test]
    fn test_close_question_matches() {
        let known = ["hi"];
        assert_eq!(engine().find_best_match("hii", &known), Some("hi"));
        assert_eq!(engine().find_best_match("goodbye", &known), None);
    }

    #[test]
    fn test_empty_known_questions() {
        let known: [&str; 0] = [];
        assert_eq!(engine().find_best_match("anything", &known), None);
    }

    #[test]
    fn test_picks_highest_score() {
        let known = ["what is your name", "what is your game?", "what's the time"];
        assert_eq!(
            engine().find_best_match("what is your name?", &known),
            Some("what is your name")
        );
    }

    #[test]
    fn test_tie_goes_to_first_occurrence() {
        // Both share "ab" with the candidate
        let engine = engine();
        let known = ["abx", "aby"];
        let matches = engine.close_matches("abz", &known, 2);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].score, matches[1].score);
        assert_eq!(engine.find_best_match("abz", &known), Some("abx"));

        let reversed = ["aby", "abx"];
        assert_eq!(engine.find_best_match("abz", &reversed), Some("aby"));
    }

    #[test]
    fn test_duplicate_questions_first_wins() {
        let known = ["hi", "hi"];
        let matches = engine().close_matches("hi", &known, 5);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].index, 0);
        assert_eq!(matches[1].index, 1);
    }

    #[test]
    fn test_close_matches_sorted_and_limited() {
        let engine = MatchEngine::new(0.0).unwrap();
        let known = vec!["xyz".to_string(), "abc".to_string(), "abd".to_string()];
        let matches = engine.close_matches("abc", &known, 2);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].question, "abc");
        assert_eq!(matches[0].index, 1);
        assert_eq!(matches[1].question, "abd");
        assert!(matches[0].score > matches[1].score);
    }

    #[test]
    fn test_close_matches_zero_n() {
        assert!(engine().close_matches("hi", &["hi"], 0).is_empty());
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        // "hi" vs "hii" scores exactly 0.8
        let engine = MatchEngine::new(0.8).unwrap();
        assert_eq!(engine.find_best_match("hii", &["hi"]), Some("hi"));
        let engine = MatchEngine::new(0.81).unwrap();
        assert_eq!(engine.find_best_match("hii", &["hi"]), None);
    }

    #[test]
    fn test_answer_for_exact_only() {
        let kb = KnowledgeBase::new(vec![Entry::new("hi", "hello")]);
        assert_eq!(engine().answer_for("hi", &kb), Some("hello"));
        assert_eq!(engine().answer_for("hii", &kb), None);
    }
}
