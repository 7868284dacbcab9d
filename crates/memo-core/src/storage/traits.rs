//! Key-value storage trait definition.

use crate::error::Result;

/// Interface for the local key-value storage notes and the gate write through.
///
/// Implementations must ensure:
/// - A `set` is visible to every later `get` of the same key
/// - Writes to one key never disturb other keys
/// - Concurrent writers resolve per key, last write wins
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `MemoError::Storage` if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_usable_as_object() {
        fn _accepts_store(_store: &mut dyn KeyValueStore) {}
    }
}
