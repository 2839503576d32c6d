//! In-process storage backend.
//!
//! Clones share the same map, so a clone handed to a second store behaves
//! like the same browser profile seen from a new page load.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{validate_key, Result, Storage, StorageError};

/// Map-backed storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with `StorageError::Unavailable`,
    /// or restore normal behavior.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        } else {
            Ok(())
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        self.check_available()?;
        Ok(self.lock()?.get(key).cloned())
    }

    async fn put(&mut self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;
        self.check_available()?;
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.check_available()?;
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_values() {
        let mut a = MemoryStorage::new();
        let b = a.clone();

        a.put("progress", b"hello").await.unwrap();
        assert_eq!(b.get("progress").await.unwrap(), Some(b"hello".to_vec()));
        assert_eq!(b.len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_fails_everything() {
        let mut storage = MemoryStorage::new();
        storage.put("progress", b"x").await.unwrap();
        storage.set_unavailable(true);

        assert!(matches!(storage.get("progress").await, Err(StorageError::Unavailable(_))));
        assert!(matches!(storage.put("progress", b"y").await, Err(StorageError::Unavailable(_))));
        assert!(matches!(storage.delete("progress").await, Err(StorageError::Unavailable(_))));

        storage.set_unavailable(false);
        assert_eq!(storage.get("progress").await.unwrap(), Some(b"x".to_vec()));
    }
}
