//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes; anything else exits with 1.

use std::fmt;

use memo_core::MemoError;

use crate::constants::{exit_codes, LIST_HINT};

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (note, config)
    NotFound { message: String, hint: String },

    /// Invalid user input or configuration
    InvalidInput {
        message: String,
        hint: Option<String>,
    },

    /// The gate did not open
    VerificationRequired {
        message: String,
        hint: Option<String>,
    },

    /// The host lacks the identity provider
    ProviderUnavailable { message: String, hint: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint }
            | CliError::ProviderUnavailable { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::InvalidInput { message, hint }
            | CliError::VerificationRequired { message, hint } => match hint {
                Some(h) => write!(f, "{}\n{}", message, h),
                None => write!(f, "{}", message),
            },
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: None,
        }
    }

    pub fn invalid_input_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn verification_required(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::VerificationRequired {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn provider_unavailable(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::ProviderUnavailable {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput { .. } => exit_codes::INVALID_INPUT,
            CliError::VerificationRequired { .. } => exit_codes::VERIFICATION_REQUIRED,
            CliError::ProviderUnavailable { .. } => exit_codes::PROVIDER_UNAVAILABLE,
        }
    }
}

/// Convert a core error, keeping the typed ones typed.
pub fn from_core(err: MemoError) -> anyhow::Error {
    match err {
        MemoError::NotFound(what) => {
            CliError::not_found(format!("{} not found", what), LIST_HINT).into()
        }
        MemoError::InvalidInput(message) => CliError::invalid_input(message).into(),
        MemoError::Configuration(what) => CliError::invalid_input_with_hint(
            format!("Missing configuration: {}", what),
            "Hint: Run `memo init` or set MEMO_APP_ID and MEMO_ACTION_ID.",
        )
        .into(),
        other => anyhow::Error::new(other),
    }
}

/// Exit code for any error coming out of a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>()
        .map(CliError::exit_code)
        .unwrap_or(1)
}
