//! Durable asset-id to entry mapping with lazy expiry.

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::CacheEntry;
use bridge_traits::storage::LocalStore;
use bridge_traits::time::Clock;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Persisted mapping from asset id to [`CacheEntry`].
///
/// Expiry is a side effect of every read: [`list`](Self::list) drops entries
/// older than the TTL and writes the trimmed collection back, so no
/// background sweeper runs. A corrupt or unreadable collection loads as
/// empty.
pub struct CacheIndex {
    store: Arc<dyn LocalStore>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
}

impl CacheIndex {
    pub fn new(store: Arc<dyn LocalStore>, clock: Arc<dyn Clock>, config: CacheConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// All unexpired entries, trimming expired ones from the persisted
    /// collection and deleting their blobs.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CacheEntry>> {
        let entries = self.load().await;
        let now = self.clock.unix_timestamp();
        let ttl = self.config.ttl_seconds();

        let (live, expired): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|e| !e.is_expired(now, ttl));

        if !expired.is_empty() {
            debug!(count = expired.len(), "Dropping expired cache entries");
            for entry in &expired {
                self.discard_blob(entry).await;
            }
            self.persist(&live).await?;
        }

        Ok(live)
    }

    /// Entry for `id` if present, unexpired, and still backed by a blob.
    ///
    /// An indexed entry whose blob has vanished is removed from the
    /// collection and reported as absent.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<CacheEntry>> {
        let entries = self.list().await?;
        let Some(entry) = entries.iter().find(|e| e.id == id).cloned() else {
            return Ok(None);
        };

        match self.store.stat_blob(&entry.local_location).await {
            Ok(stat) if !stat.exists => {
                warn!(id, "Indexed entry has no backing blob, dropping it");
                let kept: Vec<CacheEntry> = entries.into_iter().filter(|e| e.id != id).collect();
                self.persist(&kept).await?;
                Ok(None)
            }
            Ok(_) => Ok(Some(entry)),
            Err(e) => {
                warn!(id, error = %e, "Blob probe failed, keeping entry");
                Ok(Some(entry))
            }
        }
    }

    /// Insert or replace by id; persists the full collection.
    pub async fn upsert(&self, entry: CacheEntry) -> Result<()> {
        let mut entries = self.load().await;
        entries.retain(|e| e.id != entry.id);
        entries.push(entry);
        self.persist(&entries).await
    }

    /// Delete the entry and its backing blob. Returns whether anything was
    /// removed.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let entries = self.load().await;
        let (doomed, kept): (Vec<_>, Vec<_>) = entries.into_iter().partition(|e| e.id == id);

        if doomed.is_empty() {
            return Ok(false);
        }

        for entry in &doomed {
            self.discard_blob(entry).await;
        }
        self.persist(&kept).await?;
        Ok(true)
    }

    /// Total declared size of all unexpired entries.
    pub async fn total_size(&self) -> Result<u64> {
        Ok(self.list().await?.iter().map(|e| e.file_size).sum())
    }

    /// Delete every blob and reset the persisted collection to empty.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        let entries = self.load().await;
        for entry in &entries {
            self.discard_blob(entry).await;
        }
        self.persist(&[]).await
    }

    async fn discard_blob(&self, entry: &CacheEntry) {
        if let Err(e) = self.store.delete_blob(&entry.local_location).await {
            warn!(id = %entry.id, error = %e, "Failed to delete cached blob");
        }
    }

    /// Load the persisted collection, failing open to empty.
    async fn load(&self) -> Vec<CacheEntry> {
        self.try_load().await.unwrap_or_else(|e| {
            warn!(error = %e, fail_open = e.is_fail_open(), "Cache index unavailable, treating as empty");
            Vec::new()
        })
    }

    async fn try_load(&self) -> Result<Vec<CacheEntry>> {
        let bytes = match self.store.read_collection(&self.config.index_key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => return Err(CacheError::StorageRead(e.to_string())),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn persist(&self, entries: &[CacheEntry]) -> Result<()> {
        let bytes = serde_json::to_vec(entries)?;
        self.store
            .write_collection(&self.config.index_key, Bytes::from(bytes))
            .await
            .map_err(|e| CacheError::StorageWrite(e.to_string()))
    }
}
