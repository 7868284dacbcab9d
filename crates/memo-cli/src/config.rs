use std::path::{Path, PathBuf};

use memo_core::VerificationLevel;
use serde::{Deserialize, Serialize};

/// Contents of `config.toml`. Every section is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MemoConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub identity: IdentitySection,
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IdentitySection {
    pub app_id: Option<String>,
    pub action_id: Option<String>,
    #[serde(default)]
    pub level: VerificationLevel,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    pub timezone: Option<String>,
    pub editor: Option<String>,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("storage.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<MemoConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &MemoConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

fn xdg_dir(env_key: &str, fallback: &[&str]) -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env_key) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("memo"));
        }
    }
    let mut path = home_dir()?;
    for part in fallback {
        path.push(part);
    }
    Ok(path.join("memo"))
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> anyhow::Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => Ok(home_dir()?.join(rest)),
        None if path == "~" => home_dir(),
        None => Ok(PathBuf::from(path)),
    }
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: MemoConfig = toml::from_str("").unwrap();
        assert!(config.storage.path.is_none());
        assert!(config.identity.app_id.is_none());
        assert_eq!(config.identity.level, VerificationLevel::Orb);
        assert!(config.provider.args.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
[storage]
path = "/tmp/memo.json"

[identity]
app_id = "app_123"
action_id = "memo-access"
level = "device"

[provider]
command = "worldid-bridge"
args = ["--sandbox"]

[ui]
editor = "vim"
"#;
        let config: MemoConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.storage.path.as_deref(), Some("/tmp/memo.json"));
        assert_eq!(config.identity.action_id.as_deref(), Some("memo-access"));
        assert_eq!(config.identity.level, VerificationLevel::Device);
        assert_eq!(config.provider.args, vec!["--sandbox"]);
        assert_eq!(config.ui.editor.as_deref(), Some("vim"));
    }

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(
            expand_home("/var/memo.json").unwrap(),
            PathBuf::from("/var/memo.json")
        );
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("memo").join("config.toml");
        let mut config = MemoConfig::default();
        config.identity.app_id = Some("app_abc".to_string());
        config.provider.command = Some("bridge".to_string());

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.identity.app_id.as_deref(), Some("app_abc"));
        assert_eq!(loaded.provider.command.as_deref(), Some("bridge"));
    }
}
