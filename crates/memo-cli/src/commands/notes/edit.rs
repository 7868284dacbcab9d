use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::{from_core, CliError};
use crate::helpers::read_note_content;
use crate::ui::{print, receipt};

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None);
    let mut session = ctx.open_session(&ui_ctx)?;

    let id = session.find(&args.id).map_err(from_core)?.id.clone();
    session.open(&id).map_err(from_core)?;
    let initial = session
        .selected()
        .map(|note| note.content.clone())
        .unwrap_or_default();

    let content = read_note_content(args.content.clone(), args.no_input, ctx.editor()?, &initial)?
        .ok_or_else(|| {
            CliError::invalid_input_with_hint(
                "--no-input requires new content",
                "Hint: Pass --content or pipe the content via stdin.",
            )
        })?;

    if content == initial {
        tracing::debug!(id = %id, "content unchanged, skipping write");
    } else {
        session.update(&id, &content).map_err(from_core)?;
    }

    if ctx.quiet() {
        return Ok(());
    }
    let note = session.find(&id).map_err(from_core)?;
    print(
        &ui_ctx,
        &receipt(
            &ui_ctx,
            "Updated note",
            &[("ID", &note.id), ("Title", &note.title)],
        ),
    );
    Ok(())
}
