//! Durable local key-value storage.
//!
//! Notes and the verification flag live under fixed keys in a single
//! string-to-string document, the same shape a browser's local storage has.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;

/// Key holding the JSON array of notes.
pub const NOTES_KEY: &str = "simplememo.notes.v9";

/// Key holding the verified flag.
pub const VERIFIED_KEY: &str = "wld_verified";

/// Key holding the identity payload returned by a successful verification.
pub const IDENTITY_KEY: &str = "wld_identity";
