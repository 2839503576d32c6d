//! JSON file storage implementation.
//!
//! Stores each key as `<root>/<key>.json` and keeps a small meta marker per
//! key (version + updated_at) under `<root>/meta/`.

use std::path::{Path, PathBuf};

use super::{validate_key, Result, Storage};
use tokio::fs;
use tracing::debug;

/// File-based storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory and its
    /// `meta/` subdirectory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join("meta")).await?;

        Ok(Self { root })
    }

    /// Directory this storage writes to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.root.join("meta").join(format!("{}.meta.json", key))
    }

    /// Current write count for `key`, 0 if never written.
    pub async fn version(&self, key: &str) -> Result<u64> {
        validate_key(key)?;
        match fs::read_to_string(self.meta_path(key)).await {
            Ok(s) => Ok(serde_json::from_str::<serde_json::Value>(&s)
                .ok()
                .and_then(|json| json.get("version").and_then(|v| v.as_u64()))
                .unwrap_or(0)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Read and increment the per-key version, return new version.
    async fn bump_version(&self, key: &str) -> Result<u64> {
        let version = self.version(key).await? + 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(self.meta_path(key), serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        match fs::read(self.value_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&mut self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;

        // Write to a sibling and rename so readers never see a torn value.
        let path = self.value_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;

        let version = self.bump_version(key).await?;
        debug!("Stored {} ({} bytes, version {})", key, value.len(), version);
        Ok(())
    }

    async fn delete(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        for path in [self.value_path(key), self.meta_path(key)] {
            match fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        debug!("Deleted {}", key);
        Ok(())
    }
}
