use crate::app::AppContext;
use crate::cli::NewArgs;
use crate::errors::from_core;
use crate::helpers::read_note_content;
use crate::ui::{print, receipt};

pub fn handle_new(ctx: &AppContext, args: &NewArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None);
    let mut session = ctx.open_session(&ui_ctx)?;

    // Content first, so an aborted editor leaves no empty note behind.
    let content = read_note_content(args.content.clone(), args.no_input, ctx.editor()?, "")?;

    let id = session.create().map_err(from_core)?.id.clone();
    if let Some(content) = content.filter(|c| !c.is_empty()) {
        session.update(&id, &content).map_err(from_core)?;
    }
    let note = session.find(&id).map_err(from_core)?;

    if ctx.quiet() {
        println!("{}", note.id);
        return Ok(());
    }
    print(
        &ui_ctx,
        &receipt(
            &ui_ctx,
            "Created note",
            &[("ID", &note.id), ("Title", &note.title)],
        ),
    );
    Ok(())
}
