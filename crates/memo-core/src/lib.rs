//! # SimpleMemo Core
//!
//! Core library for SimpleMemo, a small note-taking application gated behind
//! an identity verification provider.
//!
//! This crate provides the domain logic and storage independent of the CLI.
//!
//! ## Architecture
//!
//! - **storage**: Local key-value storage trait and backends
//! - **note**: Notes, derived titles, and collection persistence
//! - **session**: Application state for the list and edit screens
//! - **gate**: Verification gate state machine
//! - **provider**: Identity provider capability and the command bridge

pub mod error;
pub mod fs;
pub mod gate;
pub mod note;
pub mod provider;
pub mod session;
pub mod storage;

pub use error::{MemoError, Result};
pub use gate::{GateConfig, GateView, VerificationGate, VerificationState, VerifyFailure};
pub use note::{extract_title, Note, NoteStore};
pub use provider::{CommandProvider, IdentityProvider, VerificationLevel};
pub use session::{EditView, NoteSession, Screen};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
