//! Vegvisir - Caching gateway for road traffic APIs
//!
//! This crate fronts a single read-only traffic REST API with a fixed
//! whitelist of query resources, a two-tier (fresh/stale) response cache,
//! and a bounded pool of upstream fetches. Callers get fresh data when the
//! upstream is healthy and the last known copy, marked stale, when it is
//! not.
//!
//! # Example
//!
//! ```rust,no_run
//! use vegvisir::{Resource, Vegvisir};
//!
//! #[tokio::main]
//! async fn main() -> vegvisir::Result<()> {
//!     let gateway = Vegvisir::builder()
//!         .upstream_url("https://traffic.example.com/api")
//!         .build()?;
//!
//!     let served = gateway.handle(Resource::RegionsAll, None).await?;
//!     println!("{} ({})", served.payload, served.cache.as_str());
//!     Ok(())
//! }
//! ```
//!
//! Untrusted resource names go through
//! [`TrafficGateway::handle_named`](gateway::TrafficGateway::handle_named),
//! which applies the whitelist before anything else happens. The `server`
//! feature (on by default) adds the axum HTTP surface and the `vegd`
//! binary.

pub mod cache;
pub mod error;
pub mod gateway;
pub mod limit;
pub mod resource;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod upstream;
pub mod version;

// Re-export main types at crate root
pub use error::{Result, VegvisirError};
pub use gateway::{CacheStatus, STALE_WARNING, Served, TrafficGateway, Vegvisir, VegvisirBuilder};
pub use resource::Resource;

pub use cache::{CacheConfig, STALE_TTL_FACTOR, TieredCache, cache_key};
pub use limit::{DEFAULT_MAX_CONCURRENT_FETCHES, FetchLimiter};
pub use upstream::{DEFAULT_FETCH_TIMEOUT, Origin, UpstreamClient};
pub use version::{PKG_VERSION, version_string};
