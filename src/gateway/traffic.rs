//! Request orchestration.
//!
//! [`TrafficGateway`] walks each request through the pipeline: whitelist
//! validation, fresh-tier lookup, limiter-bounded fetch, cache write, and
//! the stale fallback. It is the only component that generates upstream
//! load, so the limiter here bounds total upstream concurrency regardless
//! of inbound request rate.
//!
//! # Decision tree
//!
//! ```text
//! handle_named(name, query)
//!         │ whitelist check (reject → UnsupportedResource)
//!         ▼
//!    fresh tier ──hit──► Served { cache: Hit }        no upstream call
//!         │ miss
//!         ▼
//!    limiter slot ──► origin.fetch ──ok──► write both tiers
//!         │                                └──► Served { cache: Miss }
//!         │ upstream failure
//!         ▼
//!    stale tier ──hit──► Served { cache: Stale }      body + warning field
//!         │ miss
//!         ▼
//!    Err(original failure)
//! ```
//!
//! No retries anywhere in this pipeline; the stale fallback is the sole
//! resilience mechanism. Concurrent misses on one key each fetch upstream
//! and overwrite the cache with the same data (last writer wins) — fetches
//! are deliberately not coalesced.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::cache::{TieredCache, cache_key};
use crate::error::{Result, VegvisirError};
use crate::limit::FetchLimiter;
use crate::resource::Resource;
use crate::telemetry;
use crate::upstream::Origin;

/// Message added to stale payloads under the `warning` key.
pub const STALE_WARNING: &str = "Serving stale data; the upstream fetch failed";

/// Which path produced a served response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheStatus {
    /// Fresh-tier hit; no upstream call was made.
    Hit,
    /// Fresh miss followed by a successful fetch.
    Miss,
    /// Fresh miss, failed fetch, stale-tier fallback.
    Stale,
}

impl CacheStatus {
    /// Header-ready marker, as exposed via `X-Cache`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Stale => "STALE",
        }
    }

    fn metric_label(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
            CacheStatus::Stale => "stale",
        }
    }
}

/// A response the gateway decided to serve.
#[derive(Debug, Clone, PartialEq)]
pub struct Served {
    /// Normalised JSON body. Stale payloads carry the added `warning`
    /// field.
    pub payload: Value,
    /// Which path served it.
    pub cache: CacheStatus,
}

/// Orchestrates requests across the whitelist, cache, limiter, and origin.
///
/// Assembled via [`Vegvisir::builder()`](crate::Vegvisir::builder). Shared
/// across request tasks behind an `Arc`; all interior state is its own
/// synchronisation.
pub struct TrafficGateway {
    origin: Arc<dyn Origin>,
    cache: TieredCache,
    limiter: FetchLimiter,
}

impl fmt::Debug for TrafficGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrafficGateway")
            .field("origin", &self.origin.name())
            .finish_non_exhaustive()
    }
}

impl TrafficGateway {
    pub(crate) fn new(origin: Arc<dyn Origin>, cache: TieredCache, limiter: FetchLimiter) -> Self {
        Self {
            origin,
            cache,
            limiter,
        }
    }

    /// Validate a caller-supplied resource name, then handle the request.
    ///
    /// The only entry point that deals in untrusted names; a name outside
    /// the whitelist is rejected here with no upstream call made.
    pub async fn handle_named(&self, name: &str, raw_query: Option<&str>) -> Result<Served> {
        match Resource::from_name(name) {
            Some(resource) => self.handle(resource, raw_query).await,
            None => Err(VegvisirError::UnsupportedResource(name.to_string())),
        }
    }

    /// Handle a request for a whitelisted resource.
    ///
    /// Implements the full decision tree (see module docs). Upstream
    /// failures with a stale backup are masked as `Ok` with
    /// [`CacheStatus::Stale`]; failures without one surface as the
    /// classified error.
    #[instrument(skip(self), fields(resource = resource.name()))]
    pub async fn handle(&self, resource: Resource, raw_query: Option<&str>) -> Result<Served> {
        let start = Instant::now();
        let key = cache_key(resource, raw_query);

        if let Some(payload) = self.cache.get_fresh(&key) {
            Self::record(resource, CacheStatus::Hit, start);
            return Ok(Served {
                payload,
                cache: CacheStatus::Hit,
            });
        }

        match self.limiter.run(self.origin.fetch(resource, raw_query)).await {
            Ok(payload) => {
                self.cache.insert(&key, payload.clone());
                debug!(%key, "fetched and cached");
                Self::record(resource, CacheStatus::Miss, start);
                Ok(Served {
                    payload,
                    cache: CacheStatus::Miss,
                })
            }
            Err(e) if e.is_upstream_failure() => match self.cache.get_stale(&key) {
                Some(stale) => {
                    warn!(%key, error = %e, "upstream failed, serving stale");
                    metrics::counter!(
                        telemetry::STALE_SERVED_TOTAL,
                        "resource" => resource.name(),
                    )
                    .increment(1);
                    Self::record(resource, CacheStatus::Stale, start);
                    Ok(Served {
                        payload: with_stale_warning(stale),
                        cache: CacheStatus::Stale,
                    })
                }
                None => {
                    warn!(%key, error = %e, "upstream failed, no stale fallback");
                    Err(e)
                }
            },
            Err(e) => Err(e),
        }
    }

    fn record(resource: Resource, status: CacheStatus, start: Instant) {
        let elapsed = start.elapsed().as_secs_f64();
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "resource" => resource.name(),
            "cache" => status.metric_label(),
        )
        .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "resource" => resource.name(),
        )
        .record(elapsed);
    }
}

/// Attach the stale warning to a payload.
///
/// Objects get a `warning` key (overwriting any upstream field of that
/// name); non-object payloads are wrapped so the warning has somewhere to
/// live.
fn with_stale_warning(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => {
            map.insert(
                "warning".to_string(),
                Value::String(STALE_WARNING.to_string()),
            );
            Value::Object(map)
        }
        other => json!({ "data": other, "warning": STALE_WARNING }),
    }
}
