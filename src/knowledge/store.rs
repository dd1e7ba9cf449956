//! Knowledge store with file-based JSON persistence
//!
//! `load` touches the file once at startup, `save` rewrites it wholesale after
//! each append. The in-memory base is authoritative for the process lifetime:
//! a failed save leaves the new entry in memory.

use crate::config::KnowledgeConfig;
use crate::error::StorageError;
use crate::knowledge::types::{Entry, KnowledgeBase, SCHEMA_VERSION};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Read and parse the knowledge file at `path`
pub fn load(path: &Path) -> Result<KnowledgeBase, StorageError> {
    let data = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StorageError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let kb: KnowledgeBase =
        serde_json::from_str(&data).map_err(|source| StorageError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    if kb.version > SCHEMA_VERSION {
        return Err(StorageError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: kb.version,
            supported: SCHEMA_VERSION,
        });
    }
    if let Some(index) = kb.first_empty_question() {
        return Err(StorageError::EmptyQuestion {
            path: path.to_path_buf(),
            index,
        });
    }

    tracing::info!("Loaded {} entries from {}", kb.len(), path.display());
    Ok(kb)
}

/// Serialize the whole base to `path`, overwriting existing content.
///
/// With `atomic` set the JSON goes to a temp file in the same directory which
/// is then renamed over `path`.
pub fn save(path: &Path, kb: &KnowledgeBase, atomic: bool) -> Result<(), StorageError> {
    let write_err = |source: std::io::Error| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut json = serde_json::to_string_pretty(kb).map_err(|source| StorageError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(write_err)?;

    if atomic {
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;
    } else {
        std::fs::write(path, json).map_err(write_err)?;
    }

    tracing::debug!("Saved {} entries to {}", kb.len(), path.display());
    Ok(())
}

/// Return `kb` with `entry` added at the end. Duplicates are not checked.
pub fn append(mut kb: KnowledgeBase, entry: Entry) -> KnowledgeBase {
    kb.questions.push(entry);
    kb
}

/// Owner of the in-memory knowledge base and its backing file
#[derive(Debug)]
pub struct KnowledgeStore {
    path: PathBuf,
    atomic_write: bool,
    kb: KnowledgeBase,
}

impl KnowledgeStore {
    /// Load the knowledge base described by `config`.
    ///
    /// A missing file yields an empty base when `create_if_missing` is set;
    /// every other storage error is returned.
    pub fn open(config: &KnowledgeConfig) -> Result<Self, StorageError> {
        let kb = match load(&config.path) {
            Ok(kb) => kb,
            Err(e) if e.is_not_found() && config.create_if_missing => {
                tracing::warn!(
                    "Knowledge base {} not found, starting empty",
                    config.path.display()
                );
                KnowledgeBase::default()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            path: config.path.clone(),
            atomic_write: config.atomic_write,
            kb,
        })
    }

    /// Wrap an already loaded base
    pub fn with_base(path: impl Into<PathBuf>, kb: KnowledgeBase, atomic_write: bool) -> Self {
        Self {
            path: path.into(),
            atomic_write,
            kb,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Snapshot of the known questions
    pub fn questions(&self) -> Vec<&str> {
        self.kb.questions()
    }

    pub fn answer_for(&self, question: &str) -> Option<&str> {
        self.kb.answer_for(question)
    }

    /// Append `entry` and persist the whole base.
    ///
    /// The entry stays in memory even when the save fails.
    pub fn learn(&mut self, entry: Entry) -> Result<(), StorageError> {
        tracing::info!("Learning answer for {:?}", entry.question);
        let kb = std::mem::take(&mut self.kb);
        self.kb = append(kb, entry);
        self.persist()
    }

    /// Write the current base to its file
    pub fn persist(&self) -> Result<(), StorageError> {
        save(&self.path, &self.kb, self.atomic_write).map_err(|e| {
            tracing::warn!("Knowledge base out of sync with disk: {}", e);
            e
        })
    }
}
