//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use super::TrafficGateway;
use crate::cache::{CacheConfig, TieredCache};
use crate::limit::{DEFAULT_MAX_CONCURRENT_FETCHES, FetchLimiter};
use crate::upstream::{DEFAULT_FETCH_TIMEOUT, Origin, UpstreamClient};
use crate::{Result, VegvisirError};

/// Main entry point for creating gateway instances.
///
/// ```rust,no_run
/// # use vegvisir::Vegvisir;
/// # use std::time::Duration;
/// # fn main() -> vegvisir::Result<()> {
/// let gateway = Vegvisir::builder()
///     .upstream_url("https://traffic.example.com/api")
///     .fresh_ttl(Duration::from_secs(30))
///     .max_concurrent_fetches(6)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct Vegvisir;

impl Vegvisir {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> VegvisirBuilder {
        VegvisirBuilder::new()
    }
}

/// Builder for configuring gateway instances.
pub struct VegvisirBuilder {
    upstream_url: Option<String>,
    origin: Option<Arc<dyn Origin>>,
    fresh_ttl: Duration,
    fetch_timeout: Duration,
    max_concurrent_fetches: usize,
    max_cached_entries: u64,
}

impl VegvisirBuilder {
    pub fn new() -> Self {
        let cache_defaults = CacheConfig::default();
        Self {
            upstream_url: None,
            origin: None,
            fresh_ttl: cache_defaults.fresh_ttl,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            max_cached_entries: cache_defaults.max_entries,
        }
    }

    /// Base URL of the upstream traffic API.
    pub fn upstream_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_url = Some(url.into());
        self
    }

    /// Substitute a custom origin implementation.
    ///
    /// Takes precedence over [`upstream_url`](Self::upstream_url). Used by
    /// tests and by embedders bringing their own transport.
    pub fn origin(mut self, origin: Arc<dyn Origin>) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Fresh-tier TTL; the stale tier lives
    /// [`STALE_TTL_FACTOR`](crate::cache::STALE_TTL_FACTOR)× longer.
    pub fn fresh_ttl(mut self, ttl: Duration) -> Self {
        self.fresh_ttl = ttl;
        self
    }

    /// Hard per-fetch upstream timeout.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Maximum number of concurrent upstream fetches.
    pub fn max_concurrent_fetches(mut self, n: usize) -> Self {
        self.max_concurrent_fetches = n;
        self
    }

    /// Maximum number of cached entries per tier.
    pub fn max_cached_entries(mut self, n: u64) -> Self {
        self.max_cached_entries = n;
        self
    }

    /// Build the gateway.
    pub fn build(self) -> Result<TrafficGateway> {
        if self.fresh_ttl.is_zero() {
            return Err(VegvisirError::Configuration(
                "fresh TTL must be non-zero".to_string(),
            ));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(VegvisirError::Configuration(
                "concurrency limit must be non-zero".to_string(),
            ));
        }

        let origin: Arc<dyn Origin> = match (self.origin, self.upstream_url) {
            (Some(origin), _) => origin,
            (None, Some(url)) => Arc::new(UpstreamClient::with_timeout(url, self.fetch_timeout)),
            (None, None) => {
                return Err(VegvisirError::Configuration(
                    "an upstream URL (or custom origin) is required".to_string(),
                ));
            }
        };

        let cache = TieredCache::new(
            &CacheConfig::new()
                .max_entries(self.max_cached_entries)
                .fresh_ttl(self.fresh_ttl),
        );
        let limiter = FetchLimiter::new(self.max_concurrent_fetches);

        Ok(TrafficGateway::new(origin, cache, limiter))
    }
}

impl Default for VegvisirBuilder {
    fn default() -> Self {
        Self::new()
    }
}
