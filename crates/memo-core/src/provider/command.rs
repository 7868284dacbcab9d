//! Identity provider backed by an external bridge executable.
//!
//! The bridge is invoked as
//! `<command> verify --app-id <id> --action <id> --level <orb|device> [--signal <s>]`
//! and must print one JSON verify response on stdout.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{IdentityProvider, ProviderError, VerifyRequest, VerifyResponse};

/// Provider that shells out to a bridge command.
#[derive(Debug, Clone, Default)]
pub struct CommandProvider {
    command: Option<String>,
    args: Vec<String>,
}

impl CommandProvider {
    /// A provider for `command`. `None` models a host without the capability.
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
            args: Vec::new(),
        }
    }

    /// Extra arguments placed before the `verify` subcommand.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    fn resolve(&self) -> Option<PathBuf> {
        let command = self.command.as_deref()?;
        which::which(command).ok()
    }
}

#[async_trait]
impl IdentityProvider for CommandProvider {
    fn is_installed(&self) -> bool {
        self.resolve().is_some()
    }

    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse, ProviderError> {
        let program = self
            .resolve()
            .ok_or_else(|| ProviderError::Failed("Provider command not found".to_string()))?;

        let mut cmd = Command::new(&program);
        cmd.args(&self.args)
            .arg("verify")
            .arg("--app-id")
            .arg(&request.app_id)
            .arg("--action")
            .arg(&request.action_id)
            .arg("--level")
            .arg(request.level.as_str());
        if let Some(signal) = &request.signal {
            cmd.arg("--signal").arg(signal);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(program = %program.display(), action = %request.action_id, "invoking provider");
        let output = cmd
            .output()
            .await
            .map_err(|e| ProviderError::Failed(format!("Failed to launch provider: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("Provider exited with {}", output.status)
            } else {
                stderr
            };
            return Err(ProviderError::Failed(message));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(stdout.trim()).map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}
