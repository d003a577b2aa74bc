//! Usage analytics aggregation and presentation helpers.

use crate::models::{UsageAction, UsageRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of assets reported in the most-viewed ranking.
pub const MOST_VIEWED_LIMIT: usize = 10;

/// Number of records reported as recent activity.
pub const RECENT_ACTIVITY_LIMIT: usize = 20;

/// View count for a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetViewCount {
    pub asset_id: String,
    pub count: u64,
}

/// Summary derived from the usage ledger; recomputed on every call, never
/// persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub total_views: u64,
    pub total_downloads: u64,
    pub total_shares: u64,

    /// Top assets by view count, descending; ties in ascending asset id.
    pub most_viewed_assets: Vec<AssetViewCount>,

    /// Most recent records first.
    pub recent_activity: Vec<UsageRecord>,

    /// Timestamp the snapshot was computed at.
    pub generated_at: i64,
}

/// Fold the ledger into a snapshot.
pub fn aggregate(records: &[UsageRecord], now: i64) -> AnalyticsSnapshot {
    let mut total_views = 0u64;
    let mut total_downloads = 0u64;
    let mut total_shares = 0u64;
    let mut views_by_asset: HashMap<&str, u64> = HashMap::new();

    for record in records {
        match record.action {
            UsageAction::View => {
                total_views += 1;
                *views_by_asset.entry(record.asset_id.as_str()).or_default() += 1;
            }
            UsageAction::Download => total_downloads += 1,
            UsageAction::Share => total_shares += 1,
        }
    }

    let mut most_viewed_assets: Vec<AssetViewCount> = views_by_asset
        .into_iter()
        .map(|(asset_id, count)| AssetViewCount {
            asset_id: asset_id.to_string(),
            count,
        })
        .collect();
    most_viewed_assets.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.asset_id.cmp(&b.asset_id))
    });
    most_viewed_assets.truncate(MOST_VIEWED_LIMIT);

    let recent_activity: Vec<UsageRecord> = records
        .iter()
        .rev()
        .take(RECENT_ACTIVITY_LIMIT)
        .cloned()
        .collect();

    AnalyticsSnapshot {
        total_views,
        total_downloads,
        total_shares,
        most_viewed_assets,
        recent_activity,
        generated_at: now,
    }
}

/// Format a byte count as a human-readable string.
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    const GIB: u64 = 1024 * 1024 * 1024;

    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GIB as f64)
    }
}
