//! Persisted session storage.
//!
//! The browser implementation is `localStorage`; the two keys below match the
//! ones earlier builds of the web client wrote, so existing sessions survive
//! an upgrade.

use crate::error::StorageError;

/// Bearer token key.
pub const TOKEN_KEY: &str = "token";
/// JSON-serialized [`AuthUser`](crate::AuthUser) key.
pub const USER_KEY: &str = "user";

/// String key-value store scoped to the current browser profile.
///
/// Only [`SessionStore`](crate::SessionStore) writes the session keys.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`StorageError`] when the value cannot be written (quota,
    /// disabled storage, no storage on this target).
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);
}
