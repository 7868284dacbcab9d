use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Input, Select};
use memo_core::VerificationLevel;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{read_config, write_config, MemoConfig};
use crate::errors::CliError;
use crate::ui::format::is_valid_timezone;
use crate::ui::{hint, print, receipt};

fn parse_timezone(value: &str) -> anyhow::Result<Option<String>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    if !is_valid_timezone(trimmed) {
        return Err(CliError::invalid_input_with_hint(
            format!("Invalid timezone: {}", trimmed),
            "Hint: Use an IANA name such as Europe/Berlin, or auto.",
        )
        .into());
    }
    Ok(Some(trimmed.to_string()))
}

fn prompt_text(label: &str, current: Option<&str>) -> anyhow::Result<Option<String>> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(label)
        .allow_empty(true);
    if let Some(value) = current {
        input = input.default(value.to_string());
    }
    let value = input.interact_text()?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

fn prompt_level(current: VerificationLevel) -> anyhow::Result<VerificationLevel> {
    let levels = [VerificationLevel::Orb, VerificationLevel::Device];
    let labels: Vec<&str> = levels.iter().map(VerificationLevel::as_str).collect();
    let default = levels.iter().position(|l| *l == current).unwrap_or(0);
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Verification level")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(levels[choice])
}

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None);
    let config_path = resolve_config_path()?;

    let existing = config_path.exists();
    if existing && !args.force {
        return Err(CliError::invalid_input_with_hint(
            format!("Config already exists at {}", config_path.display()),
            "Hint: Use --force to overwrite it.",
        )
        .into());
    }
    let mut config = if existing {
        read_config(&config_path).unwrap_or_default()
    } else {
        MemoConfig::default()
    };

    let interactive = !args.no_input && std::io::stdin().is_terminal();
    let identity = &args.identity;

    config.identity.app_id = match identity.app_id.clone() {
        Some(value) => Some(value),
        None if interactive => prompt_text("App ID", config.identity.app_id.as_deref())?,
        None => config.identity.app_id,
    };
    config.identity.action_id = match identity.action_id.clone() {
        Some(value) => Some(value),
        None if interactive => prompt_text("Action ID", config.identity.action_id.as_deref())?,
        None => config.identity.action_id,
    };
    config.identity.level = match identity.level {
        Some(level) => level,
        None if interactive => prompt_level(config.identity.level)?,
        None => config.identity.level,
    };
    config.provider.command = match identity.provider.clone() {
        Some(value) => Some(value),
        None if interactive => {
            prompt_text("Provider bridge command", config.provider.command.as_deref())?
        }
        None => config.provider.command,
    };
    if let Some(editor) = &args.editor {
        config.ui.editor = Some(editor.clone());
    }
    if let Some(timezone) = &args.timezone {
        config.ui.timezone = parse_timezone(timezone)?;
    }
    if let Some(store) = &ctx.cli().store {
        config.storage.path = Some(store.clone());
    }

    write_config(&config_path, &config)?;
    tracing::info!(path = %config_path.display(), "wrote config");

    if ctx.quiet() {
        return Ok(());
    }
    let path_text = config_path.display().to_string();
    let store_text = ctx.store_path()?.display().to_string();
    print(
        &ui_ctx,
        &receipt(
            &ui_ctx,
            "Wrote config",
            &[("Config", &path_text), ("Store", &store_text)],
        ),
    );
    if config.identity.app_id.is_none() || config.identity.action_id.is_none() {
        print(
            &ui_ctx,
            &hint(&ui_ctx, "Set app_id and action_id before running `memo verify`."),
        );
    }
    Ok(())
}
