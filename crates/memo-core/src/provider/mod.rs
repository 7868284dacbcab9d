//! Identity provider capability consumed by the verification gate.
//!
//! The provider is an external collaborator: it proves the user is a unique
//! human and reports the outcome. The gate only needs to know whether the
//! host has the capability and what a verify call returned.

pub mod command;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use command::CommandProvider;

/// Strength of the credential requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationLevel {
    #[default]
    Orb,
    Device,
}

impl VerificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orb => "orb",
            Self::Device => "device",
        }
    }
}

impl std::str::FromStr for VerificationLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "orb" => Ok(Self::Orb),
            "device" => Ok(Self::Device),
            other => Err(format!(
                "Unknown verification level: {} (use orb or device)",
                other
            )),
        }
    }
}

/// Arguments of one verify call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest {
    pub app_id: String,
    pub action_id: String,
    pub level: VerificationLevel,
    pub signal: Option<String>,
}

/// Outcome status reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyStatus {
    Success,
    Error,
}

/// Proof bundle returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPayload {
    pub proof: String,
    pub merkle_root: String,
    pub nullifier_hash: String,
    pub verification_level: VerificationLevel,
}

/// Raw response of a verify call.
///
/// `final_payload` is kept loose so a malformed success payload can be told
/// apart from a transport failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub status: VerifyStatus,
    #[serde(default)]
    pub final_payload: Option<serde_json::Value>,
    #[serde(default, rename = "error_code", alias = "errorCode")]
    pub error_code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl VerifyResponse {
    /// A success response carrying `payload`.
    pub fn success(payload: &VerifyPayload) -> Self {
        Self {
            status: VerifyStatus::Success,
            final_payload: serde_json::to_value(payload).ok(),
            error_code: None,
            details: None,
        }
    }

    /// An error response with a provider error code.
    pub fn error(code: impl Into<String>, details: Option<String>) -> Self {
        Self {
            status: VerifyStatus::Error,
            final_payload: None,
            error_code: Some(code.into()),
            details,
        }
    }
}

/// Failures raised by the provider boundary itself.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider could not be reached or exited abnormally
    #[error("{0}")]
    Failed(String),

    /// The provider answered with something that is not a verify response
    #[error("Unreadable provider response: {0}")]
    Malformed(String),
}

/// Host capability that performs identity verification.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Whether the host runtime offers the capability at all.
    fn is_installed(&self) -> bool;

    /// Run one verification. May suspend for as long as the user takes.
    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse, ProviderError>;
}
