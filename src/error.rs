//! LearnBot error types

use std::path::PathBuf;
use thiserror::Error;

/// Knowledge base storage error
///
/// Every variant carries the path of the knowledge file involved so the
/// presentation layer can show where things went wrong.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Knowledge file does not exist
    #[error("knowledge base not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Knowledge file exists but could not be read
    #[error("failed to read knowledge base {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not valid JSON, or the top level lacks a `questions` sequence
    #[error("malformed knowledge base {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An entry has an empty question
    #[error("malformed knowledge base {}: entry {index} has an empty question", .path.display())]
    EmptyQuestion { path: PathBuf, index: usize },

    /// File was written by a newer schema
    #[error("knowledge base {} has unsupported version {found} (max {supported})", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    /// Knowledge file could not be written
    #[error("failed to write knowledge base {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Knowledge base could not be serialized
    #[error("failed to serialize knowledge base {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Whether the error only means "no file yet"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// LearnBot error type
#[derive(Error, Debug)]
pub enum Error {
    /// Knowledge base storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected question/answer pair
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Conversation operation called in the wrong turn state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parse error
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for LearnBot operations
pub type Result<T> = std::result::Result<T, Error>;
