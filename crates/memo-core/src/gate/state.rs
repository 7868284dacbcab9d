//! Gate states and what each one displays.

use std::fmt;

use crate::error::MemoError;

/// Why the last verification attempt did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyFailure {
    /// A required identifier is not configured; the provider was not called
    Configuration(String),
    /// The provider answered with an error status
    Rejected {
        code: Option<String>,
        details: Option<String>,
    },
    /// The provider claimed success without a usable proof payload
    Malformed(String),
    /// The provider call itself failed
    Provider(String),
    /// Verification succeeded but the result could not be stored
    Storage(String),
}

impl VerifyFailure {
    /// Human-readable message for the error screen.
    pub fn message(&self) -> String {
        match self {
            Self::Configuration(what) => format!("Missing configuration: {}", what),
            Self::Rejected { code, details } => match (code, details) {
                (Some(code), Some(details)) => {
                    format!("Verification failed ({}): {}", code, details)
                }
                (Some(code), None) => format!("Verification failed ({})", code),
                (None, Some(details)) => format!("Verification failed: {}", details),
                (None, None) => "Verification failed. Please try again.".to_string(),
            },
            Self::Malformed(reason) => format!("Verification returned an invalid payload: {}", reason),
            Self::Provider(reason) => format!("Verification failed: {}", reason),
            Self::Storage(reason) => format!("Could not save verification: {}", reason),
        }
    }

    /// Whether trying again without other changes can succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}

impl fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<&VerifyFailure> for MemoError {
    fn from(failure: &VerifyFailure) -> Self {
        match failure {
            VerifyFailure::Configuration(what) => MemoError::Configuration(what.clone()),
            VerifyFailure::Storage(reason) => MemoError::Storage(reason.clone()),
            other => MemoError::VerificationFailed(other.message()),
        }
    }
}

/// Where the gate is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VerificationState {
    /// Persisted flag not read yet
    #[default]
    Checking,
    /// Not verified; waiting for the user to start verification
    Need,
    /// Provider call in flight
    Verifying,
    /// Verified; protected content is shown
    Ok,
    /// Last attempt failed; the user may try again
    Error(VerifyFailure),
    /// Host has no provider capability; nothing to retry
    Unavailable,
}

impl VerificationState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Need => "need",
            Self::Verifying => "verifying",
            Self::Ok => "ok",
            Self::Error(_) => "error",
            Self::Unavailable => "unavailable",
        }
    }

    /// States from which the user can start a verification.
    pub fn accepts_verify(&self) -> bool {
        matches!(self, Self::Need | Self::Error(_))
    }

    pub fn failure(&self) -> Option<&VerifyFailure> {
        match self {
            Self::Error(failure) => Some(failure),
            _ => None,
        }
    }
}

impl fmt::Display for VerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const VERIFYING_TEXT: &str = "Verifying\u{2026}";
pub const UNAVAILABLE_TITLE: &str = "Open in World App";
pub const UNAVAILABLE_BODY: &str = "This app requires World App to verify your World ID.";
pub const PROMPT_TITLE: &str = "Verify with World ID";
pub const PROMPT_ACTION: &str = "Verify to continue";

/// Screen the gate shows in place of protected content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView<'a> {
    /// Checking or verifying
    Progress,
    /// Switch host environments to continue
    Unavailable,
    /// Ask the user to verify, showing the last failure if any
    Prompt { failure: Option<&'a VerifyFailure> },
    /// Show protected content
    Open,
}

impl<'a> GateView<'a> {
    pub fn for_state(state: &'a VerificationState) -> Self {
        match state {
            VerificationState::Checking | VerificationState::Verifying => Self::Progress,
            VerificationState::Unavailable => Self::Unavailable,
            VerificationState::Need => Self::Prompt { failure: None },
            VerificationState::Error(failure) => Self::Prompt {
                failure: Some(failure),
            },
            VerificationState::Ok => Self::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_per_state() {
        assert_eq!(GateView::for_state(&VerificationState::Checking), GateView::Progress);
        assert_eq!(GateView::for_state(&VerificationState::Verifying), GateView::Progress);
        assert_eq!(GateView::for_state(&VerificationState::Unavailable), GateView::Unavailable);
        assert_eq!(
            GateView::for_state(&VerificationState::Need),
            GateView::Prompt { failure: None }
        );
        assert_eq!(GateView::for_state(&VerificationState::Ok), GateView::Open);

        let failed = VerificationState::Error(VerifyFailure::Provider("boom".to_string()));
        assert!(matches!(
            GateView::for_state(&failed),
            GateView::Prompt { failure: Some(_) }
        ));
    }

    #[test]
    fn test_only_need_and_error_accept_verify() {
        assert!(VerificationState::Need.accepts_verify());
        assert!(VerificationState::Error(VerifyFailure::Malformed("x".into())).accepts_verify());
        assert!(!VerificationState::Checking.accepts_verify());
        assert!(!VerificationState::Verifying.accepts_verify());
        assert!(!VerificationState::Ok.accepts_verify());
        assert!(!VerificationState::Unavailable.accepts_verify());
    }

    #[test]
    fn test_failure_messages() {
        let rejected = VerifyFailure::Rejected {
            code: Some("max_verifications_reached".to_string()),
            details: None,
        };
        assert_eq!(rejected.message(), "Verification failed (max_verifications_reached)");
        assert!(rejected.is_retryable());

        let config = VerifyFailure::Configuration("action_id".to_string());
        assert!(config.message().contains("action_id"));
        assert!(!config.is_retryable());
        assert!(matches!(MemoError::from(&config), MemoError::Configuration(_)));
    }
}
