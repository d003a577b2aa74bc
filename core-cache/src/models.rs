//! Cache entry and usage ledger models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// Descriptor for a remote asset the caller wants cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Stable asset identifier assigned by the remote catalog.
    pub id: String,
    pub title: String,
    pub original_file_name: String,
    /// Declared size in bytes, used for eviction sizing before the transfer.
    pub file_size: u64,
    pub mime_type: String,
    /// Source location the asset is fetched from.
    pub remote_location: String,
}

/// One locally stored asset: persisted metadata plus an owned blob on disk.
///
/// An entry exists in the index if and only if its blob exists on the local
/// store; a missing blob means the entry must be dropped, never surfaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Stable asset identifier (unique key in the index).
    pub id: String,
    pub title: String,
    pub original_file_name: String,
    pub mime_type: String,
    /// Byte count reported when the asset was cached; trusted thereafter.
    pub file_size: u64,
    /// On-device blob path, owned exclusively by this entry.
    pub local_location: PathBuf,
    /// Source location used to re-fetch if needed.
    pub remote_location: String,
    /// Creation timestamp (unix seconds); immutable.
    pub cached_at: i64,
    /// Updated on every read or re-request; drives eviction order.
    pub last_accessed: i64,
    /// Incremented only by `download` usage events.
    pub download_count: u32,
}

impl CacheEntry {
    /// Create an entry for a freshly transferred asset.
    pub fn new(
        descriptor: AssetDescriptor,
        local_location: PathBuf,
        file_size: u64,
        now: i64,
    ) -> Self {
        Self {
            id: descriptor.id,
            title: descriptor.title,
            original_file_name: descriptor.original_file_name,
            mime_type: descriptor.mime_type,
            file_size,
            local_location,
            remote_location: descriptor.remote_location,
            cached_at: now,
            last_accessed: now,
            download_count: 0,
        }
    }

    /// Refresh the access timestamp. `last_accessed` never moves before
    /// `cached_at`.
    pub fn touch(&mut self, now: i64) {
        self.last_accessed = now.max(self.cached_at);
    }

    /// Record a completed download of the cached blob.
    pub fn record_download(&mut self, now: i64) {
        self.download_count = self.download_count.saturating_add(1);
        self.touch(now);
    }

    /// Whether the entry has outlived `ttl_seconds` as of `now`.
    pub fn is_expired(&self, now: i64, ttl_seconds: i64) -> bool {
        now - self.cached_at > ttl_seconds
    }
}

/// Closed set of interactions recorded in the usage ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageAction {
    View,
    Download,
    Share,
}

/// Caller-supplied context value on a usage record.
///
/// The map is open (any key), the values are a closed primitive set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

/// One recorded interaction; never mutated after creation.
///
/// `asset_id` is not required to reference a currently cached asset: usage
/// history outlives eviction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub id: Uuid,
    pub asset_id: String,
    pub action: UsageAction,
    /// Creation time (unix seconds); immutable.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, MetadataValue>,
}

impl UsageRecord {
    /// Create a record stamped at `now`.
    pub fn new(
        asset_id: impl Into<String>,
        action: UsageAction,
        metadata: HashMap<String, MetadataValue>,
        now: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_id: asset_id.into(),
            action,
            timestamp: now,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str) -> AssetDescriptor {
        AssetDescriptor {
            id: id.to_string(),
            title: "Pricing deck".to_string(),
            original_file_name: "pricing.pdf".to_string(),
            file_size: 1024,
            mime_type: "application/pdf".to_string(),
            remote_location: "https://cdn.example.com/pricing.pdf".to_string(),
        }
    }

    #[test]
    fn test_new_entry_timestamps() {
        let entry = CacheEntry::new(descriptor("a1"), PathBuf::from("/tmp/a1.bin"), 2048, 100);

        assert_eq!(entry.cached_at, 100);
        assert_eq!(entry.last_accessed, 100);
        assert_eq!(entry.download_count, 0);
        assert_eq!(entry.file_size, 2048);
    }

    #[test]
    fn test_touch_never_precedes_creation() {
        let mut entry = CacheEntry::new(descriptor("a1"), PathBuf::from("/tmp/a1.bin"), 10, 100);

        entry.touch(50);
        assert_eq!(entry.last_accessed, 100);

        entry.touch(200);
        assert_eq!(entry.last_accessed, 200);
    }

    #[test]
    fn test_expiry_boundary() {
        let entry = CacheEntry::new(descriptor("a1"), PathBuf::from("/tmp/a1.bin"), 10, 1000);

        assert!(!entry.is_expired(1000 + 30, 30));
        assert!(entry.is_expired(1000 + 31, 30));
    }

    #[test]
    fn test_record_download() {
        let mut entry = CacheEntry::new(descriptor("a1"), PathBuf::from("/tmp/a1.bin"), 10, 100);

        entry.record_download(150);
        entry.record_download(175);

        assert_eq!(entry.download_count, 2);
        assert_eq!(entry.last_accessed, 175);
    }

    #[test]
    fn test_action_serialization() {
        assert_eq!(
            serde_json::to_string(&UsageAction::Download).unwrap(),
            "\"download\""
        );
        assert_eq!(
            serde_json::from_str::<UsageAction>("\"share\"").unwrap(),
            UsageAction::Share
        );
    }

    #[test]
    fn test_metadata_round_trip() {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), MetadataValue::from("detail_view"));
        metadata.insert("page".to_string(), MetadataValue::from(3i64));
        metadata.insert("online".to_string(), MetadataValue::from(true));

        let record = UsageRecord::new("a1", UsageAction::View, metadata, 42);
        let json = serde_json::to_string(&record).unwrap();
        let decoded: UsageRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, record);
        assert_eq!(
            decoded.metadata.get("page"),
            Some(&MetadataValue::Integer(3))
        );
    }
}
