//! Application context for the memo CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file and builds the
//! store, gate and session that command handlers work with.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use memo_core::{CommandProvider, FileStore, GateConfig, NoteSession, VerificationGate};

use crate::cli::{Cli, IdentityArgs};
use crate::config::MemoConfig;
use crate::constants::VERIFY_HINT;
use crate::errors::CliError;
use crate::ui::{self, UiContext};

use super::resolver::{load_config, resolve_store_path};

pub type Gate = VerificationGate<FileStore, CommandProvider>;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<MemoConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading them on first use.
    pub fn config(&self) -> anyhow::Result<&MemoConfig> {
        self.config.get_or_try_init(load_config)
    }

    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        resolve_store_path(self.cli, self.config()?)
    }

    pub fn open_store(&self) -> anyhow::Result<FileStore> {
        Ok(FileStore::open(self.store_path()?))
    }

    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }

    pub fn editor(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.config()?.ui.editor.as_deref())
    }

    pub fn timezone(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.config()?.ui.timezone.as_deref())
    }

    /// Identifiers for the provider call; flags and env win over the file.
    pub fn gate_config(
        &self,
        identity: &IdentityArgs,
        signal: Option<&str>,
    ) -> anyhow::Result<GateConfig> {
        let section = &self.config()?.identity;
        Ok(GateConfig {
            app_id: identity.app_id.clone().or_else(|| section.app_id.clone()),
            action_id: identity
                .action_id
                .clone()
                .or_else(|| section.action_id.clone()),
            level: identity.level.unwrap_or(section.level),
            signal: signal.map(String::from),
        })
    }

    pub fn provider(&self, identity: &IdentityArgs) -> anyhow::Result<CommandProvider> {
        let section = &self.config()?.provider;
        let command = identity
            .provider
            .clone()
            .or_else(|| section.command.clone());
        Ok(CommandProvider::new(command).with_args(section.args.clone()))
    }

    /// Build the gate for this store and read the persisted flag.
    pub fn mount_gate(&self, identity: &IdentityArgs, signal: Option<&str>) -> anyhow::Result<Gate> {
        let mut gate = VerificationGate::new(
            self.open_store()?,
            self.provider(identity)?,
            self.gate_config(identity, signal)?,
        );
        gate.mount();
        Ok(gate)
    }

    /// Open the notes behind the gate.
    ///
    /// When the gate stays closed its screen is written to stderr and a
    /// verification-required error is returned.
    pub fn open_session(&self, ui_ctx: &UiContext) -> anyhow::Result<NoteSession<FileStore>> {
        let gate = self.mount_gate(&IdentityArgs::default(), None)?;
        let store = self.open_store()?;
        if let Some(session) = gate.protect(|| NoteSession::load(store)) {
            return Ok(session);
        }

        if ui_ctx.mode.is_pretty() {
            eprintln!("{}", ui::gate_view(ui_ctx, &gate.view()));
        }
        Err(CliError::verification_required("Notes are locked until you verify", VERIFY_HINT).into())
    }
}
