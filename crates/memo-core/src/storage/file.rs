//! File-backed key-value store.
//!
//! The whole store is one JSON object on disk. Every write re-reads the
//! document, changes a single key and replaces the file atomically, so two
//! processes writing different keys do not lose each other's values.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::traits::KeyValueStore;
use crate::error::{MemoError, Result};
use crate::fs::write_atomic;

type Document = BTreeMap<String, String>;

/// Key-value store persisted as a JSON document.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`. The file is created lazily on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the keys currently stored.
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read_document()?.into_keys().collect())
    }

    fn read_document(&self) -> Result<Document> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(err) => {
                return Err(MemoError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    err
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(Document::new());
        }
        match serde_json::from_str(&raw) {
            Ok(doc) => Ok(doc),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "storage document is not valid JSON, starting empty"
                );
                Ok(Document::new())
            }
        }
    }

    fn write_document(&self, doc: &Document) -> Result<()> {
        let contents = serde_json::to_vec_pretty(doc)
            .map_err(|e| MemoError::Storage(format!("Failed to encode store: {}", e)))?;
        write_atomic(&self.path, &contents).map_err(|e| {
            MemoError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut doc = self.read_document()?;
        doc.insert(key.to_string(), value.to_string());
        self.write_document(&doc)?;
        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut doc = self.read_document()?;
        if doc.remove(key).is_some() {
            self.write_document(&doc)?;
        }
        Ok(())
    }
}
