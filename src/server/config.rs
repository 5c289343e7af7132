//! Configuration for vegd.
//!
//! CLI arguments and environment variable handling using clap. Every
//! setting has a `VEGVISIR_*` environment variable, so the daemon runs
//! unattended from an env file alone.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

/// vegd — caching traffic gateway daemon.
#[derive(Parser, Debug, Clone)]
#[command(name = "vegd")]
#[command(version = crate::PKG_VERSION)]
#[command(long_version = crate::version::long_version())]
#[command(about = "Caching gateway for road traffic APIs")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "VEGVISIR_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Base URL of the upstream traffic API
    #[arg(long, env = "VEGVISIR_UPSTREAM_URL")]
    pub upstream_url: String,

    /// Fresh-tier cache TTL in seconds (the stale tier lives 10x longer)
    #[arg(long, env = "VEGVISIR_CACHE_TTL_SECS", default_value_t = 30)]
    pub cache_ttl_secs: u64,

    /// Upstream request timeout in milliseconds
    #[arg(long, env = "VEGVISIR_FETCH_TIMEOUT_MS", default_value_t = 5000)]
    pub fetch_timeout_ms: u64,

    /// Maximum concurrent upstream fetches
    #[arg(long, env = "VEGVISIR_MAX_CONCURRENT_FETCHES", default_value_t = 6)]
    pub max_concurrent_fetches: usize,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, env = "VEGVISIR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Reject settings the gateway builder would choke on, with messages
    /// naming the offending variable.
    pub fn validate(&self) -> Result<(), String> {
        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://")
        {
            return Err("VEGVISIR_UPSTREAM_URL must be an http(s) URL".to_string());
        }
        if self.cache_ttl_secs == 0 {
            return Err("VEGVISIR_CACHE_TTL_SECS must be non-zero".to_string());
        }
        if self.fetch_timeout_ms == 0 {
            return Err("VEGVISIR_FETCH_TIMEOUT_MS must be non-zero".to_string());
        }
        if self.max_concurrent_fetches == 0 {
            return Err("VEGVISIR_MAX_CONCURRENT_FETCHES must be non-zero".to_string());
        }
        Ok(())
    }

    /// Fresh-tier TTL as a [`Duration`].
    pub fn fresh_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Upstream timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
