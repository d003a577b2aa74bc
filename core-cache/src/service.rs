//! # Asset Cache Service
//!
//! Main orchestrator for downloading, indexing, and accounting offline
//! assets.
//!
//! This module ties the index, evictor, and usage ledger together behind the
//! contract the companion app consumes:
//! - Size budget enforced by pre-emptive least-recently-accessed eviction
//! - Lazy time-to-live expiry on every listing
//! - Bounded usage ledger feeding on-demand analytics
//! - Fail-soft public surface: a broken cache degrades, it never panics or
//!   propagates errors into the surrounding application

use crate::analytics::{aggregate, AnalyticsSnapshot};
use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::evictor::select_victims;
use crate::index::CacheIndex;
use crate::ledger::UsageLedger;
use crate::models::{AssetDescriptor, CacheEntry, MetadataValue, UsageAction, UsageRecord};
use crate::stats::CacheStats;
use bridge_traits::storage::LocalStore;
use bridge_traits::time::Clock;
use bridge_traits::transport::ByteTransport;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Offline cache service for the companion app's asset library.
///
/// Constructed from injected collaborators so tests can substitute fakes for
/// the transport, store, and clock.
///
/// Both persisted collections use a read-collection / mutate /
/// write-collection cycle, so every operation is serialized through a single
/// writer lock; interleaved callers would otherwise clobber each other's
/// writes.
pub struct AssetCacheService {
    config: CacheConfig,
    index: CacheIndex,
    ledger: UsageLedger,
    transport: Arc<dyn ByteTransport>,
    store: Arc<dyn LocalStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl AssetCacheService {
    /// Create a new cache service.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache limits and collection keys
    /// * `transport` - Byte transport for fetching remote assets
    /// * `store` - Local store holding collections and blobs
    /// * `clock` - Time source for expiry and access stamps
    pub fn new(
        config: CacheConfig,
        transport: Arc<dyn ByteTransport>,
        store: Arc<dyn LocalStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let index = CacheIndex::new(store.clone(), clock.clone(), config.clone());
        let ledger = UsageLedger::new(store.clone(), config.clone());

        Self {
            config,
            index,
            ledger,
            transport,
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// All cached entries, expiring stale ones as a side effect.
    #[instrument(skip(self))]
    pub async fn list_cached(&self) -> Vec<CacheEntry> {
        let _guard = self.write_lock.lock().await;

        match self.index.list().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Listing cached assets failed");
                Vec::new()
            }
        }
    }

    /// Entry for `id` if cached and unexpired.
    pub async fn get(&self, id: &str) -> Option<CacheEntry> {
        let _guard = self.write_lock.lock().await;
        self.index.get(id).await.unwrap_or_default()
    }

    /// Whether `id` is currently cached.
    pub async fn is_cached(&self, id: &str) -> bool {
        self.get(id).await.is_some()
    }

    /// Cache a remote asset locally.
    ///
    /// Re-requesting an already cached asset refreshes its access time
    /// without a new transfer. Returns `None` when the transfer fails or is
    /// refused; no partial entry or blob is left behind.
    #[instrument(skip(self, descriptor), fields(id = %descriptor.id))]
    pub async fn cache(&self, descriptor: AssetDescriptor) -> Option<CacheEntry> {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.unix_timestamp();

        match self.index.get(&descriptor.id).await {
            Ok(Some(mut entry)) => {
                entry.touch(now);
                if let Err(e) = self.index.upsert(entry.clone()).await {
                    warn!(error = %e, "Failed to persist refreshed access time");
                }
                debug!("Asset already cached, access time refreshed");
                return Some(entry);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Cache lookup failed");
                return None;
            }
        }

        if descriptor.file_size > self.config.max_cache_bytes {
            warn!(
                declared = descriptor.file_size,
                budget = self.config.max_cache_bytes,
                "Asset larger than the cache budget, refusing"
            );
            return None;
        }

        self.reclaim_for(&descriptor).await;

        let destination = self.blob_destination(&descriptor.id).await?;

        let outcome = match self
            .transport
            .fetch(&descriptor.remote_location, &destination)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Transfer failed");
                self.discard_destination(&destination).await;
                return None;
            }
        };

        if !outcome.success {
            info!("Transfer refused by remote, nothing cached");
            self.discard_destination(&destination).await;
            return None;
        }

        let file_size = if outcome.bytes_written > 0 {
            outcome.bytes_written
        } else {
            descriptor.file_size
        };
        let entry = CacheEntry::new(descriptor, destination.clone(), file_size, now);

        if let Err(e) = self.index.upsert(entry.clone()).await {
            warn!(error = %e, "Failed to record cache entry");
            self.discard_destination(&destination).await;
            return None;
        }

        info!(size = entry.file_size, "Asset cached");
        Some(entry)
    }

    /// Remove a cached asset and its blob. Returns whether anything was
    /// removed.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> bool {
        let _guard = self.write_lock.lock().await;

        match self.index.remove(id).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(error = %e, "Removing cached asset failed");
                false
            }
        }
    }

    /// Total declared size of all cached assets in bytes.
    pub async fn total_size(&self) -> u64 {
        let _guard = self.write_lock.lock().await;
        self.index.total_size().await.unwrap_or(0)
    }

    /// Derived cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let _guard = self.write_lock.lock().await;

        let entries = self.index.list().await.unwrap_or_default();
        CacheStats::from_entries(&entries, self.clock.unix_timestamp())
    }

    /// Record a usage event.
    ///
    /// A `download` event additionally bumps the entry's download counter
    /// and access time when the asset is still cached; if it has since been
    /// evicted the record is kept and the counter update is skipped.
    #[instrument(skip(self, metadata))]
    pub async fn record_usage(
        &self,
        asset_id: &str,
        action: UsageAction,
        metadata: Option<HashMap<String, MetadataValue>>,
    ) {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.unix_timestamp();
        let record = UsageRecord::new(asset_id, action, metadata.unwrap_or_default(), now);

        if let Err(e) = self.ledger.append(record).await {
            warn!(error = %e, "Failed to append usage record");
            return;
        }

        if action == UsageAction::Download {
            match self.index.get(asset_id).await {
                Ok(Some(mut entry)) => {
                    entry.record_download(now);
                    if let Err(e) = self.index.upsert(entry).await {
                        warn!(error = %e, "Failed to persist download counter");
                    }
                }
                Ok(None) => debug!("Download recorded for an asset no longer cached"),
                Err(e) => warn!(error = %e, "Download counter lookup failed"),
            }
        }
    }

    /// Usage summary computed from the ledger.
    #[instrument(skip(self))]
    pub async fn analytics(&self) -> AnalyticsSnapshot {
        let _guard = self.write_lock.lock().await;

        let records = self.ledger.all().await;
        aggregate(&records, self.clock.unix_timestamp())
    }

    /// Delete every cached blob and reset both persisted collections.
    ///
    /// Returns `false` when either collection could not be reset; callers
    /// must then assume nothing was cleared.
    #[instrument(skip(self))]
    pub async fn clear_all(&self) -> bool {
        let _guard = self.write_lock.lock().await;

        if let Err(e) = self.index.clear().await {
            warn!(error = %e, "Failed to clear cache index");
            return false;
        }
        if let Err(e) = self.ledger.clear().await {
            warn!(error = %e, "Failed to clear usage ledger");
            return false;
        }

        info!("Cache cleared");
        true
    }

    /// Evict least-recently-accessed entries so the incoming asset fits.
    async fn reclaim_for(&self, descriptor: &AssetDescriptor) {
        let entries = match self.index.list().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Eviction sizing failed");
                return;
            }
        };

        let current: u64 = entries.iter().map(|e| e.file_size).sum();
        let prospective = current.saturating_add(descriptor.file_size);
        if prospective <= self.config.max_cache_bytes {
            return;
        }

        let victims = select_victims(
            &entries,
            prospective,
            self.config.max_cache_bytes,
            self.config.eviction_headroom,
        );
        info!(count = victims.len(), "Evicting assets to make room");

        for id in victims {
            match self.index.remove(&id).await {
                Ok(true) => debug!(victim = %id, "Evicted asset"),
                Ok(false) => {}
                Err(e) => warn!(victim = %id, error = %e, "Eviction failed"),
            }
        }
    }

    async fn blob_destination(&self, id: &str) -> Option<PathBuf> {
        let root = match self.store.blob_root().await {
            Ok(root) => root,
            Err(e) => {
                warn!(error = %e, "Blob root unavailable");
                return None;
            }
        };

        let dir = root.join(&self.config.cache_directory);
        if let Err(e) = self.store.ensure_directory(&dir).await {
            warn!(error = %CacheError::Filesystem(e.to_string()), "Failed to create cache directory");
            return None;
        }

        Some(dir.join(format!("{}.bin", id)))
    }

    async fn discard_destination(&self, destination: &Path) {
        if let Err(e) = self.store.delete_blob(destination).await {
            warn!(error = %e, "Failed to discard partial blob");
        }
    }
}
