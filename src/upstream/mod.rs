//! Upstream fetch seam.
//!
//! [`Origin`] is the trait the orchestrator drives; [`UpstreamClient`] is
//! the production implementation speaking HTTP to the traffic API. Tests
//! substitute doubles to exercise orchestration without a network.

pub mod client;

pub use client::{DEFAULT_FETCH_TIMEOUT, UpstreamClient};

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::resource::Resource;

/// Source of upstream documents.
///
/// One call is one outbound fetch; implementations classify failures via
/// [`VegvisirError`](crate::VegvisirError) so the orchestrator can choose
/// between stale fallback and a hard error. Implementations never retry.
#[async_trait]
pub trait Origin: Send + Sync {
    /// Implementation name for logging/debugging.
    fn name(&self) -> &str;

    /// Fetch one resource, passing the caller's query string through
    /// verbatim. Returns the normalised JSON body.
    async fn fetch(&self, resource: Resource, raw_query: Option<&str>) -> Result<Value>;
}
