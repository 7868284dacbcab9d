use memo_core::{IdentityProvider, NoteSession};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::{IdentityArgs, StatusArgs};
use crate::ui::{self, format_timestamp, gate_view, header, kv, print};

/// Show the gate state, where data lives and whether the provider resolves.
pub fn handle_status(ctx: &AppContext, args: &StatusArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json, None);
    let gate = ctx.mount_gate(&IdentityArgs::default(), None)?;
    let store_path = ctx.store_path()?.display().to_string();
    let config_path = resolve_config_path()?.display().to_string();
    let provider_installed = gate.provider().is_installed();
    let identity = gate.identity();
    let store = ctx.open_store()?;
    let note_count = gate.protect(|| NoteSession::load(store).list().len());

    if ui_ctx.mode.is_json() {
        let value = serde_json::json!({
            "state": gate.state().name(),
            "store": store_path,
            "config": config_path,
            "providerInstalled": provider_installed,
            "identity": identity,
            "notes": note_count,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let pretty = ui_ctx.mode.is_pretty();
    if pretty {
        print(&ui_ctx, &header(&ui_ctx, "status", None));
        ui::blank_line(&ui_ctx);
    }
    print(&ui_ctx, &gate_view(&ui_ctx, &gate.view()));
    print(&ui_ctx, &kv(&ui_ctx, "Store", &store_path));
    print(&ui_ctx, &kv(&ui_ctx, "Config", &config_path));
    print(
        &ui_ctx,
        &kv(
            &ui_ctx,
            "Provider",
            if provider_installed { "installed" } else { "not found" },
        ),
    );
    if let Some(identity) = &identity {
        let timezone = ctx.timezone()?;
        print(
            &ui_ctx,
            &kv(&ui_ctx, "Level", identity.verification_level.as_str()),
        );
        print(
            &ui_ctx,
            &kv(
                &ui_ctx,
                "Verified At",
                &format_timestamp(identity.verified_at, timezone, pretty),
            ),
        );
    }
    if let Some(count) = note_count {
        print(&ui_ctx, &kv(&ui_ctx, "Notes", &count.to_string()));
    }
    Ok(())
}
