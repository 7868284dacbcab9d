//! memo - notes behind a World ID verification gate
//!
//! Command-line host for `memo-core`: it mounts the verification gate on every
//! protected command and renders the list and edit screens in the terminal.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{init, misc, notes, status, verify};
use crate::errors::exit_code_for;
use crate::ui::{header, hint, print, print_error};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli).await {
        let ui_ctx = ctx.ui_context(false, None);
        let error_msg = format!("{}", e);
        let (message, error_hint) = split_hint(&error_msg);
        tracing::debug!(error = ?e, "command failed");
        print_error(&ui_ctx, message, error_hint);
        std::process::exit(exit_code_for(&e));
    }
}

/// Split "message\nHint: ..." into its two parts.
fn split_hint(error: &str) -> (&str, Option<&str>) {
    match error.find("\nHint:") {
        Some(idx) => (&error[..idx], Some(&error[idx + 1..])),
        None => (error, None),
    }
}

async fn run(ctx: &AppContext<'_>, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args),
        Some(Commands::Verify(args)) => verify::handle_verify(ctx, args).await,
        Some(Commands::Status(args)) => status::handle_status(ctx, args),
        Some(Commands::List(args)) => notes::handle_list(ctx, args),
        Some(Commands::New(args)) => notes::handle_new(ctx, args),
        Some(Commands::Show(args)) => notes::handle_show(ctx, args),
        Some(Commands::Edit(args)) => notes::handle_edit(ctx, args),
        Some(Commands::Delete(args)) => notes::handle_delete(ctx, args),
        Some(Commands::Completions(args)) => misc::handle_completions(args.shell),
        None => {
            print_quickstart(ctx);
            Ok(())
        }
    }
}

fn print_quickstart(ctx: &AppContext) {
    let ui_ctx = ctx.ui_context(false, None);
    print(&ui_ctx, &header(&ui_ctx, "quickstart", None));
    for line in [
        "memo init      write app_id, action_id and the provider bridge",
        "memo verify    verify with World ID to unlock notes",
        "memo new       create a note",
        "memo list      list notes, newest first",
    ] {
        print(&ui_ctx, &format!("  {}", line));
    }
    print(&ui_ctx, &hint(&ui_ctx, "Run `memo --help` for all commands."));
}
