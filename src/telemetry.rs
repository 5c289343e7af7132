//! Telemetry metric name constants.
//!
//! Centralised metric names for vegvisir operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `vegvisir_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `resource` — whitelisted resource name (e.g. "findRegionsAll")
//! - `cache` — serving path: "hit", "miss" or "stale"
//! - `tier` — cache tier: "fresh" or "stale"
//! - `outcome` — upstream fetch result: "ok", "http_error", "timeout"
//!   or "transport"

/// Total requests served by the gateway.
///
/// Labels: `resource`, `cache` ("hit" | "miss" | "stale").
pub const REQUESTS_TOTAL: &str = "vegvisir_requests_total";

/// Request handling duration in seconds.
///
/// Labels: `resource`.
pub const REQUEST_DURATION_SECONDS: &str = "vegvisir_request_duration_seconds";

/// Total cache lookup hits.
///
/// Labels: `tier` ("fresh" | "stale").
pub const CACHE_HITS_TOTAL: &str = "vegvisir_cache_hits_total";

/// Total cache lookup misses.
///
/// Labels: `tier` ("fresh" | "stale").
pub const CACHE_MISSES_TOTAL: &str = "vegvisir_cache_misses_total";

/// Total outbound upstream fetches.
///
/// Labels: `outcome` ("ok" | "http_error" | "timeout" | "transport").
pub const UPSTREAM_FETCHES_TOTAL: &str = "vegvisir_upstream_fetches_total";

/// Total responses served from the stale tier after a failed fetch.
///
/// Labels: `resource`.
pub const STALE_SERVED_TOTAL: &str = "vegvisir_stale_served_total";
