//! Local Store Implementation using Tokio

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::{BlobStat, LocalStore},
};
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Tokio-based local store implementation
///
/// Persists collections as JSON documents and asset blobs as plain files:
/// - `<root>/collections/<key>.json` for each persisted collection
/// - `<root>/assets/` as the blob root
pub struct TokioLocalStore {
    root: PathBuf,
}

impl TokioLocalStore {
    /// Create a new local store rooted at the platform data directory
    pub fn new() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("offline-asset-core");

        Self { root }
    }

    /// Create a new local store rooted at a custom directory
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    fn collection_path(&self, key: &str) -> PathBuf {
        self.root.join("collections").join(format!("{}.json", key))
    }

    fn map_io_error(e: std::io::Error) -> BridgeError {
        BridgeError::Io(e)
    }
}

impl Default for TokioLocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocalStore for TokioLocalStore {
    async fn read_collection(&self, key: &str) -> Result<Option<Bytes>> {
        let path = self.collection_path(key);

        match fs::read(&path).await {
            Ok(data) => {
                debug!(key, size = data.len(), "Read collection");
                Ok(Some(Bytes::from(data)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::map_io_error(e)),
        }
    }

    async fn write_collection(&self, key: &str, data: Bytes) -> Result<()> {
        let path = self.collection_path(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(Self::map_io_error)?;
        }

        fs::write(&path, data.as_ref())
            .await
            .map_err(Self::map_io_error)?;
        debug!(key, size = data.len(), "Wrote collection");
        Ok(())
    }

    async fn blob_root(&self) -> Result<PathBuf> {
        let root = self.root.join("assets");

        if !root.exists() {
            fs::create_dir_all(&root).await.map_err(Self::map_io_error)?;
            debug!(path = ?root, "Created blob root");
        }
        Ok(root)
    }

    async fn ensure_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).await.map_err(Self::map_io_error)?;
        debug!(path = ?path, "Ensured directory");
        Ok(())
    }

    async fn stat_blob(&self, location: &Path) -> Result<BlobStat> {
        match fs::metadata(location).await {
            Ok(metadata) => Ok(BlobStat {
                exists: metadata.is_file(),
                size: metadata.len(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BlobStat::missing()),
            Err(e) => Err(Self::map_io_error(e)),
        }
    }

    async fn delete_blob(&self, location: &Path) -> Result<()> {
        match fs::remove_file(location).await {
            Ok(()) => {
                debug!(path = ?location, "Deleted blob");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::map_io_error(e)),
        }
    }
}
