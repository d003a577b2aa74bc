//! Cache configuration and limits

/// Configuration for the asset cache service.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum total size of cached blobs in bytes (default: 500MB)
    pub max_cache_bytes: u64,

    /// Fraction of the budget eviction trims down to, so the very next
    /// insert does not trigger eviction again (default: 0.8)
    pub eviction_headroom: f64,

    /// Maximum entry age in days before lazy expiry (default: 30)
    pub ttl_days: i64,

    /// Maximum number of usage records retained (default: 1000)
    pub ledger_cap: usize,

    /// Directory for cached blobs, relative to the store's blob root
    pub cache_directory: String,

    /// Collection key holding the cache index
    pub index_key: String,

    /// Collection key holding the usage ledger
    pub ledger_key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_cache_bytes: 500 * 1024 * 1024, // 500MB
            eviction_headroom: 0.8,
            ttl_days: 30,
            ledger_cap: 1000,
            cache_directory: "asset_cache".to_string(),
            index_key: "asset_cache_index".to_string(),
            ledger_key: "asset_usage_ledger".to_string(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum cache size.
    pub fn with_max_cache_bytes(mut self, bytes: u64) -> Self {
        self.max_cache_bytes = bytes;
        self
    }

    /// Set the eviction headroom fraction.
    pub fn with_eviction_headroom(mut self, headroom: f64) -> Self {
        self.eviction_headroom = headroom;
        self
    }

    /// Set the entry time-to-live in days.
    pub fn with_ttl_days(mut self, days: i64) -> Self {
        self.ttl_days = days;
        self
    }

    /// Set the usage ledger capacity.
    pub fn with_ledger_cap(mut self, cap: usize) -> Self {
        self.ledger_cap = cap;
        self
    }

    /// Set cache directory name.
    pub fn with_cache_directory(mut self, dir: String) -> Self {
        self.cache_directory = dir;
        self
    }

    /// Entry age limit in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        chrono::Duration::days(self.ttl_days).num_seconds()
    }

    /// Size eviction trims the cache down to.
    pub fn headroom_bytes(&self) -> u64 {
        (self.max_cache_bytes as f64 * self.eviction_headroom) as u64
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cache_bytes == 0 {
            return Err("max_cache_bytes must be greater than 0".to_string());
        }

        if !(self.eviction_headroom > 0.0 && self.eviction_headroom <= 1.0) {
            return Err("eviction_headroom must be within (0, 1]".to_string());
        }

        if self.ttl_days <= 0 {
            return Err("ttl_days must be at least 1".to_string());
        }

        if self.ledger_cap == 0 {
            return Err("ledger_cap must be at least 1".to_string());
        }

        if self.cache_directory.is_empty() {
            return Err("cache_directory cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.max_cache_bytes, 500 * 1024 * 1024);
        assert_eq!(config.eviction_headroom, 0.8);
        assert_eq!(config.ttl_days, 30);
        assert_eq!(config.ledger_cap, 1000);
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::new()
            .with_max_cache_bytes(1024 * 1024)
            .with_eviction_headroom(0.5)
            .with_ttl_days(7)
            .with_ledger_cap(10);

        assert_eq!(config.max_cache_bytes, 1024 * 1024);
        assert_eq!(config.eviction_headroom, 0.5);
        assert_eq!(config.ttl_days, 7);
        assert_eq!(config.ledger_cap, 10);
    }

    #[test]
    fn test_derived_limits() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl_seconds(), 30 * 24 * 60 * 60);
        assert_eq!(config.headroom_bytes(), 400 * 1024 * 1024);
    }

    #[test]
    fn test_config_validation() {
        assert!(CacheConfig::default().validate().is_ok());

        let invalid_size = CacheConfig::default().with_max_cache_bytes(0);
        assert!(invalid_size.validate().is_err());

        let invalid_headroom = CacheConfig::default().with_eviction_headroom(1.5);
        assert!(invalid_headroom.validate().is_err());

        let invalid_ttl = CacheConfig::default().with_ttl_days(0);
        assert!(invalid_ttl.validate().is_err());

        let invalid_cap = CacheConfig::default().with_ledger_cap(0);
        assert!(invalid_cap.validate().is_err());

        let invalid_dir = CacheConfig::default().with_cache_directory(String::new());
        assert!(invalid_dir.validate().is_err());
    }
}
