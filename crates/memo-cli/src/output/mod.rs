//! Output formatting helpers for notes.

mod json;
mod text;

pub use json::{note_json, notes_json};
pub use text::{print_note, print_note_list};
