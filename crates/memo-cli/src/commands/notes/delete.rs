use dialoguer::{theme::ColorfulTheme, Confirm};
use memo_core::session::DELETE_PROMPT;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::{from_core, CliError};
use crate::ui::{print, receipt};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None);
    let mut session = ctx.open_session(&ui_ctx)?;

    let note = session.find(&args.id).map_err(from_core)?;
    let (id, title) = (note.id.clone(), note.title.clone());
    session.request_delete(&id);

    let confirmed = if args.yes {
        true
    } else if ui_ctx.is_interactive() {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} ({})", DELETE_PROMPT, title))
            .default(false)
            .interact()?
    } else {
        session.cancel_delete();
        return Err(CliError::invalid_input_with_hint(
            "Refusing to delete without confirmation",
            "Hint: Pass --yes to delete non-interactively.",
        )
        .into());
    };

    if !confirmed {
        session.cancel_delete();
        if !ctx.quiet() {
            print(&ui_ctx, "Delete cancelled.");
        }
        return Ok(());
    }

    session.confirm_delete().map_err(from_core)?;
    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Deleted note", &[("ID", &id), ("Title", &title)]),
        );
    }
    Ok(())
}
