use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::helpers::validate_format;
use crate::output::{notes_json, print_note_list};
use crate::ui::{header, print};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    validate_format(args.format.as_deref())?;
    let ui_ctx = ctx.ui_context(args.json, args.format.as_deref());
    let session = ctx.open_session(&ui_ctx)?;

    let notes = session.list();
    let shown = match args.limit {
        Some(limit) => &notes[..limit.min(notes.len())],
        None => notes,
    };

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&notes_json(shown))?);
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() {
        let count = format!("{} of {}", shown.len(), notes.len());
        print(&ui_ctx, &header(&ui_ctx, "list", Some(&count)));
    }
    print_note_list(&ui_ctx, shown, ctx.timezone()?);
    Ok(())
}
