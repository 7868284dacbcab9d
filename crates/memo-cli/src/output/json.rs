//! JSON output formatting for notes.

use memo_core::Note;

/// Convert a note to JSON for output, using the stored field names.
pub fn note_json(note: &Note) -> serde_json::Value {
    serde_json::json!({
        "id": note.id,
        "title": note.title,
        "content": note.content,
        "createdAt": note.created_at,
        "updatedAt": note.updated_at,
    })
}

pub fn notes_json(notes: &[Note]) -> Vec<serde_json::Value> {
    notes.iter().map(note_json).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_json_matches_stored_shape() {
        let mut note = Note::new(5);
        note.set_content("Hello\nWorld", 9);
        let value = note_json(&note);
        assert_eq!(value["title"], "Hello");
        assert_eq!(value["createdAt"], 5);
        assert_eq!(value["updatedAt"], 9);
        assert_eq!(value, serde_json::to_value(&note).unwrap());
    }
}
