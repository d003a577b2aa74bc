//! Cache statistics and monitoring

use crate::models::CacheEntry;
use serde::{Deserialize, Serialize};

/// Summary of the cache index; derived on demand, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cached assets
    pub entry_count: usize,

    /// Total declared size of cached blobs
    pub total_bytes: u64,

    /// Total download count across all cached assets
    pub total_downloads: u64,

    /// Timestamp when stats were calculated
    pub calculated_at: i64,
}

impl CacheStats {
    /// Build stats from the current index contents.
    pub fn from_entries(entries: &[CacheEntry], now: i64) -> Self {
        Self {
            entry_count: entries.len(),
            total_bytes: entries.iter().map(|e| e.file_size).sum(),
            total_downloads: entries.iter().map(|e| u64::from(e.download_count)).sum(),
            calculated_at: now,
        }
    }

    /// Calculate cache usage as a percentage of max size.
    pub fn usage_percentage(&self, max_bytes: u64) -> f64 {
        if max_bytes == 0 {
            return 0.0;
        }

        (self.total_bytes as f64 / max_bytes as f64) * 100.0
    }

    /// Returns true if the cache is near capacity (>90%).
    pub fn is_near_capacity(&self, max_bytes: u64) -> bool {
        self.usage_percentage(max_bytes) > 90.0
    }

    /// Returns true if the cache is full (>=100%).
    pub fn is_full(&self, max_bytes: u64) -> bool {
        self.total_bytes >= max_bytes
    }
}
