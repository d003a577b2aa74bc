//! Local Store Abstraction
//!
//! Provides a platform-agnostic trait for durable key/value collections and
//! individual asset blobs.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Result of probing a blob on the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobStat {
    pub exists: bool,
    pub size: u64,
}

impl BlobStat {
    /// Stat value for a blob that is not present.
    pub fn missing() -> Self {
        Self {
            exists: false,
            size: 0,
        }
    }
}

/// Local store trait
///
/// Abstracts the on-device persistence the cache core relies on:
/// - Named collections holding serialized documents (the cache index and the
///   usage ledger each occupy one key)
/// - Individual asset blobs addressed by path
///
/// Supported backings per platform:
/// - Desktop: files under the app data directory
/// - iOS/Android: sandboxed app directories
/// - Web: OPFS, IndexedDB
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::LocalStore;
///
/// async fn load_index(store: &dyn LocalStore) -> Result<Option<bytes::Bytes>> {
///     store.read_collection("asset_cache_index").await
/// }
/// ```
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Read the raw bytes of a persisted collection.
    ///
    /// Returns `Ok(None)` when the collection has never been written.
    async fn read_collection(&self, key: &str) -> Result<Option<Bytes>>;

    /// Replace the full contents of a persisted collection.
    async fn write_collection(&self, key: &str, data: Bytes) -> Result<()>;

    /// Base directory under which asset blobs are stored.
    async fn blob_root(&self) -> Result<PathBuf>;

    /// Create a directory and all parent directories if they don't exist.
    async fn ensure_directory(&self, path: &Path) -> Result<()>;

    /// Probe a blob for existence and size.
    ///
    /// A missing blob is reported via [`BlobStat::missing`], not an error.
    async fn stat_blob(&self, location: &Path) -> Result<BlobStat>;

    /// Delete a blob.
    ///
    /// Deleting a blob that does not exist is a no-op.
    async fn delete_blob(&self, location: &Path) -> Result<()>;
}
