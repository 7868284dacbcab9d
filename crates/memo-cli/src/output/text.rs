//! Text and table output for notes.

use memo_core::session::EMPTY_LIST_MESSAGE;
use memo_core::Note;

use crate::ui::{self, format_timestamp, short_id, single_line, truncate, UiContext};

const PREVIEW_CHARS: usize = 48;

/// Print the list screen: title, preview and update time per note.
pub fn print_note_list(ctx: &UiContext, notes: &[Note], timezone: Option<&str>) {
    if notes.is_empty() {
        ui::print(ctx, EMPTY_LIST_MESSAGE);
        return;
    }

    let pretty = ctx.mode.is_pretty();
    let rows: Vec<Vec<String>> = notes
        .iter()
        .map(|note| {
            vec![
                if pretty { short_id(&note.id) } else { note.id.clone() },
                note.title.clone(),
                truncate(&single_line(&note.preview()), PREVIEW_CHARS),
                format_timestamp(note.updated_at, timezone, pretty),
            ]
        })
        .collect();
    ui::print(
        ctx,
        &ui::simple_table(ctx, &["ID", "Title", "Preview", "Updated"], &rows),
    );
}

/// Print one note: header fields, then the content.
pub fn print_note(ctx: &UiContext, note: &Note, timezone: Option<&str>) {
    let pretty = ctx.mode.is_pretty();
    if pretty {
        ui::print(ctx, &ui::header(ctx, "show", Some(&note.title)));
    }
    ui::print(ctx, &ui::kv(ctx, "ID", &note.id));
    ui::print(ctx, &ui::kv(ctx, "Title", &note.title));
    ui::print(
        ctx,
        &ui::kv(ctx, "Created", &format_timestamp(note.created_at, timezone, pretty)),
    );
    ui::print(
        ctx,
        &ui::kv(ctx, "Updated", &format_timestamp(note.updated_at, timezone, pretty)),
    );
    ui::print(ctx, "");
    ui::print(ctx, &note.content);
}
