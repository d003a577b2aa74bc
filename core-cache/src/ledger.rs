//! Bounded append-only usage ledger.

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::UsageRecord;
use bridge_traits::storage::LocalStore;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Persisted append log of usage events, capped at a fixed length.
///
/// Capacity is strict FIFO: once the cap is reached the oldest records are
/// dropped, whatever their action type. Reads fail open to an empty
/// sequence.
pub struct UsageLedger {
    store: Arc<dyn LocalStore>,
    config: CacheConfig,
}

impl UsageLedger {
    pub fn new(store: Arc<dyn LocalStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Append a record, trimming the oldest entries beyond the cap.
    #[instrument(skip(self, record))]
    pub async fn append(&self, record: UsageRecord) -> Result<()> {
        let mut records = self.load().await;
        records.push(record);

        if records.len() > self.config.ledger_cap {
            let excess = records.len() - self.config.ledger_cap;
            records.drain(..excess);
            debug!(dropped = excess, "Usage ledger trimmed to capacity");
        }

        self.persist(&records).await
    }

    /// Full capped sequence in insertion order.
    pub async fn all(&self) -> Vec<UsageRecord> {
        self.load().await
    }

    /// Reset the persisted sequence to empty.
    pub async fn clear(&self) -> Result<()> {
        self.persist(&[]).await
    }

    async fn load(&self) -> Vec<UsageRecord> {
        self.try_load().await.unwrap_or_else(|e| {
            warn!(error = %e, "Usage ledger unavailable, treating as empty");
            Vec::new()
        })
    }

    async fn try_load(&self) -> Result<Vec<UsageRecord>> {
        let bytes = match self.store.read_collection(&self.config.ledger_key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => return Err(CacheError::StorageRead(e.to_string())),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn persist(&self, records: &[UsageRecord]) -> Result<()> {
        let bytes = serde_json::to_vec(records)?;
        self.store
            .write_collection(&self.config.ledger_key, Bytes::from(bytes))
            .await
            .map_err(|e| CacheError::StorageWrite(e.to_string()))
    }
}
