//! Path resolution for the config and storage files.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, expand_home, read_config, MemoConfig};

pub const CONFIG_ENV: &str = "MEMO_CONFIG";

/// Resolve the config file path, checking MEMO_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file, or defaults when it does not exist.
pub fn load_config() -> anyhow::Result<MemoConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(MemoConfig::default());
    }
    read_config(&path)
}

/// Storage file from `--store`/MEMO_STORE, then the config, then the default.
pub fn resolve_store_path(cli: &Cli, config: &MemoConfig) -> anyhow::Result<PathBuf> {
    let explicit = cli
        .store
        .as_deref()
        .or(config.storage.path.as_deref())
        .filter(|p| !p.trim().is_empty());
    match explicit {
        Some(path) => expand_home(path),
        None => default_store_path(),
    }
}
