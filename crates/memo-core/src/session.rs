//! Application state for the note screens.
//!
//! `NoteSession` owns the note collection, the current selection, the active
//! screen and the staged delete. Every mutation writes the full collection
//! through to storage before returning.

use crate::error::{MemoError, Result};
use crate::note::{now_millis, Note, NoteStore};
use crate::storage::KeyValueStore;

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    List,
    Edit,
}

/// What the edit screen shows.
#[derive(Debug, PartialEq, Eq)]
pub enum EditView<'a> {
    /// The selected note, open for editing
    Editing(&'a Note),
    /// Nothing selected
    Empty,
}

impl EditView<'_> {
    /// Header line for the edit screen.
    pub fn heading(&self) -> &str {
        match self {
            EditView::Editing(note) => &note.title,
            EditView::Empty => "No note selected",
        }
    }
}

/// Message shown by the edit screen when nothing is selected.
pub const EMPTY_EDIT_MESSAGE: &str = "Select a note from List.";

/// Message shown by the list screen when there are no notes.
pub const EMPTY_LIST_MESSAGE: &str = "No notes yet. Tap New to start.";

/// Confirmation asked before a staged delete is applied.
pub const DELETE_PROMPT: &str = "Delete note? This cannot be undone.";

/// Notes, selection and screen state for one session.
pub struct NoteSession<S: KeyValueStore> {
    notes: Vec<Note>,
    selected: Option<String>,
    screen: Screen,
    pending_delete: Option<String>,
    store: NoteStore<S>,
    clock: fn() -> i64,
}

impl<S: KeyValueStore> NoteSession<S> {
    /// Start a session from whatever the store holds.
    pub fn load(store: S) -> Self {
        let store = NoteStore::new(store);
        let notes = store.load();
        tracing::debug!(count = notes.len(), "loaded notes");
        Self {
            notes,
            selected: None,
            screen: Screen::List,
            pending_delete: None,
            store,
            clock: now_millis,
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Notes in display order, newest created first.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Resolve a full id or a unique id prefix.
    pub fn find(&self, id_or_prefix: &str) -> Result<&Note> {
        if let Some(note) = self.get(id_or_prefix) {
            return Ok(note);
        }
        if id_or_prefix.is_empty() {
            return Err(MemoError::InvalidInput("Note ID cannot be empty".to_string()));
        }
        let mut matches = self
            .notes
            .iter()
            .filter(|n| n.id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(note), None) => Ok(note),
            (Some(_), Some(_)) => Err(MemoError::InvalidInput(format!(
                "Note ID prefix '{}' is ambiguous",
                id_or_prefix
            ))),
            (None, _) => Err(MemoError::NotFound(format!("Note '{}'", id_or_prefix))),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected(&self) -> Option<&Note> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Id staged for deletion, awaiting confirmation.
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Insert an empty note at the head, select it and switch to edit.
    pub fn create(&mut self) -> Result<&Note> {
        let note = Note::new((self.clock)());
        tracing::info!(id = %note.id, "created note");
        self.selected = Some(note.id.clone());
        self.notes.insert(0, note);
        self.screen = Screen::Edit;
        self.persist()?;
        Ok(&self.notes[0])
    }

    /// Select an existing note and switch to edit.
    pub fn open(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(MemoError::NotFound(format!("Note '{}'", id)));
        }
        self.selected = Some(id.to_string());
        self.screen = Screen::Edit;
        Ok(())
    }

    /// Switch to the list screen. The selection is kept.
    pub fn show_list(&mut self) {
        self.screen = Screen::List;
    }

    /// Replace the content of the selected note.
    ///
    /// Returns `Ok(false)` without touching anything when `id` is not the
    /// selected note.
    pub fn update(&mut self, id: &str, content: &str) -> Result<bool> {
        if self.selected.as_deref() != Some(id) {
            tracing::debug!(id, "ignoring update for unselected note");
            return Ok(false);
        }
        let now = (self.clock)();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        note.set_content(content, now);
        self.persist()?;
        Ok(true)
    }

    /// Stage `id` for deletion.
    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    /// Remove the staged note, if any.
    ///
    /// Clears the selection when the removed note was selected. Returns the
    /// removed note.
    pub fn confirm_delete(&mut self) -> Result<Option<Note>> {
        let Some(target) = self.pending_delete.take() else {
            return Ok(None);
        };
        let removed = self
            .notes
            .iter()
            .position(|n| n.id == target)
            .map(|index| self.notes.remove(index));
        if self.selected.as_deref() == Some(target.as_str()) {
            self.selected = None;
        }
        self.persist()?;
        if removed.is_some() {
            tracing::info!(id = %target, "deleted note");
        }
        Ok(removed)
    }

    /// Drop the staged id without deleting anything.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// What the edit screen should show.
    pub fn edit_view(&self) -> EditView<'_> {
        match self.selected() {
            Some(note) => EditView::Editing(note),
            None => EditView::Empty,
        }
    }

    /// Borrow the underlying key-value store.
    pub fn store(&self) -> &S {
        self.store.store()
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.notes)
    }
}
