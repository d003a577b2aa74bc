//! # Asset Cache Usage Example
//!
//! This example demonstrates wiring the cache service to the desktop bridges
//! and exercising the full flow: caching assets, recording usage, computing
//! analytics, and clearing the cache.
//!
//! The byte transport is a synthetic in-process implementation so the demo
//! runs without network access; swap in `ReqwestByteTransport` for real
//! transfers.
//!
//! Run with: `cargo run --example cache_demo --package core-cache`

use async_trait::async_trait;
use bridge_desktop::TokioLocalStore;
use bridge_traits::error::Result;
use bridge_traits::time::SystemClock;
use bridge_traits::transport::{ByteTransport, FetchOutcome};
use core_cache::{format_size, AssetCacheService, AssetDescriptor, CacheConfig, UsageAction};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Synthetic Byte Transport (for demonstration)
// ============================================================================

/// Writes a generated payload instead of fetching over the network.
struct SyntheticTransport;

#[async_trait]
impl ByteTransport for SyntheticTransport {
    async fn fetch(&self, remote: &str, destination: &Path) -> Result<FetchOutcome> {
        let payload = format!("synthetic payload for {}\n", remote).repeat(1024);
        tokio::fs::write(destination, &payload).await?;
        Ok(FetchOutcome::completed(payload.len() as u64))
    }
}

fn descriptor(id: &str, title: &str, file_name: &str) -> AssetDescriptor {
    AssetDescriptor {
        id: id.to_string(),
        title: title.to_string(),
        original_file_name: file_name.to_string(),
        file_size: 32 * 1024,
        mime_type: "application/pdf".to_string(),
        remote_location: format!("https://cdn.example.com/assets/{}", file_name),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,core_cache=debug")),
        )
        .init();

    info!("=== Asset Cache Demo ===");

    // Keep everything under a throwaway directory.
    let data_dir = tempfile::TempDir::new().expect("Failed to create demo directory");
    let store = Arc::new(TokioLocalStore::with_root(data_dir.path().to_path_buf()));

    let service = AssetCacheService::new(
        CacheConfig::default(),
        Arc::new(SyntheticTransport),
        store,
        Arc::new(SystemClock),
    );

    // Cache a few assets.
    for (id, title, file_name) in [
        ("a-100", "Pricing deck 2026", "pricing-2026.pdf"),
        ("a-101", "Installation manual", "install-manual.pdf"),
        ("a-102", "Product demo reel", "demo-reel.mp4"),
    ] {
        match service.cache(descriptor(id, title, file_name)).await {
            Some(entry) => info!(id = %entry.id, size = %format_size(entry.file_size), "Cached"),
            None => info!(id, "Caching failed"),
        }
    }

    // Re-requesting an asset refreshes its access time without a transfer.
    service.cache(descriptor("a-100", "Pricing deck 2026", "pricing-2026.pdf")).await;

    info!(
        count = service.list_cached().await.len(),
        total = %format_size(service.total_size().await),
        "Cache contents"
    );

    // Record some usage and derive analytics.
    service.record_usage("a-100", UsageAction::View, None).await;
    service.record_usage("a-100", UsageAction::View, None).await;
    service.record_usage("a-100", UsageAction::Download, None).await;
    service.record_usage("a-102", UsageAction::Share, None).await;

    let snapshot = service.analytics().await;
    info!(
        views = snapshot.total_views,
        downloads = snapshot.total_downloads,
        shares = snapshot.total_shares,
        "Usage totals"
    );
    if let Some(top) = snapshot.most_viewed_assets.first() {
        info!(asset = %top.asset_id, count = top.count, "Most viewed");
    }

    // Tear everything down.
    let cleared = service.clear_all().await;
    info!(cleared, remaining = service.list_cached().await.len(), "Cache cleared");
}
