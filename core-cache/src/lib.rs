//! # Offline Asset Cache Module
//!
//! Owns the on-device asset cache for the companion app and the usage
//! analytics derived from it.
//!
//! ## Overview
//!
//! This module manages:
//! - Downloading remote assets into a budgeted local cache
//! - Least-recently-accessed eviction with headroom below the budget
//! - Lazy time-to-live expiry of stale entries
//! - A bounded usage ledger and on-demand analytics aggregation
//!
//! The core is platform-agnostic: all I/O goes through the `bridge-traits`
//! collaborators ([`ByteTransport`](bridge_traits::transport::ByteTransport),
//! [`LocalStore`](bridge_traits::storage::LocalStore),
//! [`Clock`](bridge_traits::time::Clock)) injected into
//! [`AssetCacheService`](service::AssetCacheService).

pub mod analytics;
pub mod config;
pub mod error;
pub mod evictor;
pub mod index;
pub mod ledger;
pub mod models;
pub mod service;
pub mod stats;

pub use analytics::{aggregate, format_size, AnalyticsSnapshot, AssetViewCount};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use models::{AssetDescriptor, CacheEntry, MetadataValue, UsageAction, UsageRecord};
pub use service::AssetCacheService;
pub use stats::CacheStats;
