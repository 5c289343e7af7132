//! Two-tier (fresh/stale) response store.
//!
//! Every successful upstream fetch is written to both tiers at once: the
//! fresh tier honours the short configured TTL and serves normal cache
//! hits; the stale tier holds the same body for [`STALE_TTL_FACTOR`] times
//! longer and is only read when a live fetch fails. The tiers are two moka
//! stores sharing a key space, so a fresh-tier expiry never disturbs the
//! stale backup.
//!
//! Expiry is the store's own: an expired entry behaves as a miss on read,
//! with no sweeper for correctness to depend on.

use std::time::Duration;

use moka::sync::Cache;
use serde_json::Value;

use crate::telemetry;

/// Multiplier applied to the fresh TTL to derive the stale TTL.
pub const STALE_TTL_FACTOR: u32 = 10;

/// Configuration for the tiered cache.
///
/// ```rust
/// # use vegvisir::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(10_000)
///     .fresh_ttl(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries per tier. Default: 10,000.
    pub max_entries: u64,
    /// Fresh-tier TTL; the stale tier lives [`STALE_TTL_FACTOR`]× longer.
    /// Default: 30 seconds.
    pub fresh_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            fresh_ttl: Duration::from_secs(30),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries per tier.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the fresh-tier TTL.
    pub fn fresh_ttl(mut self, ttl: Duration) -> Self {
        self.fresh_ttl = ttl;
        self
    }
}

/// In-memory two-tier cache of normalised upstream bodies.
///
/// Writes are whole-entry overwrites (last writer wins); lookups are
/// synchronous and never block the async scheduler.
pub struct TieredCache {
    fresh: Cache<String, Value>,
    stale: Cache<String, Value>,
    fresh_ttl: Duration,
}

impl TieredCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let fresh = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.fresh_ttl)
            .build();
        let stale = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.fresh_ttl * STALE_TTL_FACTOR)
            .build();
        Self {
            fresh,
            stale,
            fresh_ttl: config.fresh_ttl,
        }
    }

    /// Look up the fresh tier. Emits cache hit/miss metrics.
    pub fn get_fresh(&self, key: &str) -> Option<Value> {
        lookup(&self.fresh, key, "fresh")
    }

    /// Look up the stale tier. Emits cache hit/miss metrics.
    ///
    /// Only consulted after a failed fetch; a hit here is a candidate for
    /// stale serving, never a normal cache hit.
    pub fn get_stale(&self, key: &str) -> Option<Value> {
        lookup(&self.stale, key, "stale")
    }

    /// Write a fetched body to both tiers, resetting both expiry clocks.
    pub fn insert(&self, key: &str, value: Value) {
        self.fresh.insert(key.to_string(), value.clone());
        self.stale.insert(key.to_string(), value);
    }

    /// Fresh-tier TTL this cache was built with.
    pub fn fresh_ttl(&self) -> Duration {
        self.fresh_ttl
    }

    /// Stale-tier TTL (fresh TTL × [`STALE_TTL_FACTOR`]).
    pub fn stale_ttl(&self) -> Duration {
        self.fresh_ttl * STALE_TTL_FACTOR
    }
}

fn lookup(cache: &Cache<String, Value>, key: &str, tier: &'static str) -> Option<Value> {
    match cache.get(key) {
        Some(value) => {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "tier" => tier).increment(1);
            Some(value)
        }
        None => {
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "tier" => tier).increment(1);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_writes_both_tiers() {
        let cache = TieredCache::new(&CacheConfig::new());
        cache.insert("traffic:findRegionsAll:", json!({"regions": []}));

        assert_eq!(
            cache.get_fresh("traffic:findRegionsAll:"),
            Some(json!({"regions": []}))
        );
        assert_eq!(
            cache.get_stale("traffic:findRegionsAll:"),
            Some(json!({"regions": []}))
        );
    }

    #[test]
    fn get_after_set_returns_exactly_the_written_value() {
        let cache = TieredCache::new(&CacheConfig::new());
        let value = json!({"foo": 1, "nested": {"bar": [1, 2, 3]}});
        cache.insert("k", value.clone());
        assert_eq!(cache.get_fresh("k"), Some(value));
    }

    #[test]
    fn insert_overwrites_whole_entry() {
        let cache = TieredCache::new(&CacheConfig::new());
        cache.insert("k", json!({"v": 1}));
        cache.insert("k", json!({"v": 2}));
        assert_eq!(cache.get_fresh("k"), Some(json!({"v": 2})));
        assert_eq!(cache.get_stale("k"), Some(json!({"v": 2})));
    }

    #[test]
    fn unknown_key_misses_both_tiers() {
        let cache = TieredCache::new(&CacheConfig::new());
        assert_eq!(cache.get_fresh("absent"), None);
        assert_eq!(cache.get_stale("absent"), None);
    }

    #[test]
    fn stale_ttl_is_ten_times_fresh() {
        let config = CacheConfig::new().fresh_ttl(Duration::from_secs(30));
        let cache = TieredCache::new(&config);
        assert_eq!(cache.fresh_ttl(), Duration::from_secs(30));
        assert_eq!(cache.stale_ttl(), Duration::from_secs(300));
    }
}
