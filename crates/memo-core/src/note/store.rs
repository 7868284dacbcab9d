//! Persistence of the note collection.
//!
//! The collection is stored as one JSON array under [`NOTES_KEY`] and is
//! rewritten in full on every save.

use std::collections::HashSet;

use serde::Deserialize;

use super::{extract_title, Note};
use crate::error::Result;
use crate::storage::{KeyValueStore, NOTES_KEY};

/// A stored record; older payloads may lack a title.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredNote {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: String,
    created_at: i64,
    updated_at: i64,
}

impl From<StoredNote> for Note {
    fn from(stored: StoredNote) -> Self {
        let title = stored
            .title
            .unwrap_or_else(|| extract_title(&stored.content));
        Note {
            id: stored.id,
            title,
            content: stored.content,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

/// Ordered note collection mirrored to a key-value store.
#[derive(Debug)]
pub struct NoteStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the stored collection.
    ///
    /// Never fails: an absent key, an unreadable store or an invalid payload
    /// all yield an empty list. Records repeating an earlier id are dropped.
    pub fn load(&self) -> Vec<Note> {
        let raw = match self.store.get(NOTES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read notes, starting empty");
                return Vec::new();
            }
        };

        let stored: Vec<StoredNote> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(error = %err, "stored notes are not valid, starting empty");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut notes = Vec::with_capacity(stored.len());
        for record in stored {
            if !seen.insert(record.id.clone()) {
                tracing::warn!(id = %record.id, "dropping note with duplicate id");
                continue;
            }
            notes.push(Note::from(record));
        }
        notes
    }

    /// Serialize the full collection, replacing what was stored.
    pub fn save(&mut self, notes: &[Note]) -> Result<()> {
        let raw = serde_json::to_string(notes)?;
        self.store.set(NOTES_KEY, &raw)?;
        tracing::debug!(count = notes.len(), "saved notes");
        Ok(())
    }

    /// Borrow the underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_absent_key_loads_empty() {
        let store = NoteStore::new(MemoryStore::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_invalid_payload_loads_empty() {
        let store = NoteStore::new(MemoryStore::new().with(NOTES_KEY, "{\"oops\":"));
        assert!(store.load().is_empty());

        let wrong_shape = NoteStore::new(MemoryStore::new().with(NOTES_KEY, "{\"a\":1}"));
        assert!(wrong_shape.load().is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let mut store = NoteStore::new(MemoryStore::new());
        let mut first = Note::new(1);
        first.set_content("first", 1);
        let mut second = Note::new(2);
        second.set_content("second", 2);
        let notes = vec![second.clone(), first.clone()];

        store.save(&notes).unwrap();

        assert_eq!(store.load(), notes);
    }

    #[test]
    fn test_missing_title_is_derived() {
        let raw = r#"[{"id":"abc","content":"Shopping\nlist","createdAt":1,"updatedAt":2}]"#;
        let store = NoteStore::new(MemoryStore::new().with(NOTES_KEY, raw));
        let notes = store.load();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Shopping");
        assert_eq!(notes[0].id, "abc");
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let raw = r#"[
            {"id":"a","title":"one","content":"one","createdAt":2,"updatedAt":2},
            {"id":"a","title":"two","content":"two","createdAt":1,"updatedAt":1}
        ]"#;
        let store = NoteStore::new(MemoryStore::new().with(NOTES_KEY, raw));
        let notes = store.load();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "one");
    }
}
