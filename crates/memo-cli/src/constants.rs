//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// 0 is success and 1 a general error (anyhow); 2 is reserved by shells.
pub mod exit_codes {
    /// Resource not found (note, config).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, arguments or configuration.
    pub const INVALID_INPUT: i32 = 4;

    /// The gate is closed: verification is required or just failed.
    pub const VERIFICATION_REQUIRED: i32 = 5;

    /// The host has no identity provider capability.
    pub const PROVIDER_UNAVAILABLE: i32 = 6;
}

/// Hint shown whenever a command needs a verified gate.
pub const VERIFY_HINT: &str = "Hint: Run `memo verify` to continue.";

/// Hint shown when a note ID does not resolve.
pub const LIST_HINT: &str = "Hint: Run `memo list` to find note IDs.";
