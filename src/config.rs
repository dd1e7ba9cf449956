//! LearnBot configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default similarity cutoff for accepting a match
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Default knowledge file, relative to the working directory
pub const DEFAULT_KNOWLEDGE_FILE: &str = "knowledge_base.json";

/// Main LearnBot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnBotConfig {
    /// Knowledge base storage configuration
    pub knowledge: KnowledgeConfig,

    /// Matching configuration
    pub matching: MatchingConfig,

    /// Chat presentation texts
    pub chat: ChatConfig,
}

/// Knowledge base storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Path to the JSON knowledge file
    pub path: PathBuf,

    /// Start from an empty knowledge base when the file does not exist
    pub create_if_missing: bool,

    /// Write to a temp file and rename over the target on save
    pub atomic_write: bool,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_KNOWLEDGE_FILE),
            create_if_missing: true,
            atomic_write: true,
        }
    }
}

/// Matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum similarity ratio (0.0 - 1.0) for a match
    pub cutoff: f64,

    /// Number of close matches listed by `learnbot match`
    pub max_suggestions: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            max_suggestions: 3,
        }
    }
}

/// Chat presentation texts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Transcript prefix for user lines
    pub user_label: String,

    /// Transcript prefix for bot lines
    pub bot_label: String,

    /// Reply when no known question matches
    pub fallback_answer: String,

    /// Reply after a new answer was learned
    pub learned_message: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            user_label: "You".to_string(),
            bot_label: "Bot".to_string(),
            fallback_answer: "I don't know the answer. Can you teach me?".to_string(),
            learned_message: "Thank you! I've learned something new.".to_string(),
        }
    }
}

impl LearnBotConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `<config dir>/learnbot/config.toml`
    /// is used when present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        };

        let config = match path {
            Some(p) => {
                tracing::debug!("Loading configuration from {}", p.display());
                let content = std::fs::read_to_string(&p)?;
                toml::from_str(&content)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Default config file location (~/.config/learnbot/config.toml on Linux)
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|d| d.join("learnbot").join("config.toml"))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        validate_cutoff(self.matching.cutoff)?;
        if self.knowledge.path.as_os_str().is_empty() {
            return Err(Error::Config("knowledge.path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Reject cutoffs outside 0.0 - 1.0 (NaN included)
pub fn validate_cutoff(cutoff: f64) -> Result<()> {
    if (0.0..=1.0).contains(&cutoff) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "matching.cutoff must be within 0.0 and 1.0, got {}",
            cutoff
        )))
    }
}
