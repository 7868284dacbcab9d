use memo_core::session::EMPTY_EDIT_MESSAGE;
use memo_core::EditView;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::errors::from_core;
use crate::output::{note_json, print_note};
use crate::ui::print;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json, None);
    let mut session = ctx.open_session(&ui_ctx)?;

    let id = session.find(&args.id).map_err(from_core)?.id.clone();
    session.open(&id).map_err(from_core)?;

    match session.edit_view() {
        EditView::Editing(note) if ui_ctx.mode.is_json() => {
            println!("{}", serde_json::to_string_pretty(&note_json(note))?);
        }
        EditView::Editing(note) => print_note(&ui_ctx, note, ctx.timezone()?),
        EditView::Empty => print(&ui_ctx, EMPTY_EDIT_MESSAGE),
    }
    Ok(())
}
