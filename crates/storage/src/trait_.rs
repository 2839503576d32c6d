//! Storage trait abstraction.

use async_trait::async_trait;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key contains characters the backend cannot store
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Backend cannot be reached (quota, permissions, poisoned state)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A key-value byte store.
///
/// Every value is written whole; there are no partial updates.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the value under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the value under `key`.
    async fn put(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn delete(&mut self, key: &str) -> Result<()>;
}

/// Check that a key is safe to use as a file stem.
pub fn validate_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
