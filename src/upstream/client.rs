//! HTTP client for the upstream traffic API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header;
use serde_json::{Value, json};
use tracing::debug;

use super::Origin;
use crate::error::{Result, VegvisirError};
use crate::resource::Resource;
use crate::telemetry;

/// Default per-request timeout for upstream fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Client for the upstream traffic API.
///
/// Issues read-only GETs with a hard per-request timeout and normalises
/// every successful body to JSON. Non-2xx statuses, timeouts, and
/// undecodable bodies map to the corresponding
/// [`VegvisirError`](crate::VegvisirError) variants; nothing is retried
/// here.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout (point the base
    /// URL at a wiremock server in tests).
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch one resource from the upstream.
    ///
    /// The URL is `<base>/<resource>?<raw-query>` with the caller's query
    /// string passed through byte-for-byte. Exactly one outbound call is
    /// made per invocation; the timeout is scoped to the request future,
    /// so the timer is released however the call settles.
    pub async fn fetch_resource(
        &self,
        resource: Resource,
        raw_query: Option<&str>,
    ) -> Result<Value> {
        let result = self.fetch_inner(resource, raw_query).await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(VegvisirError::UpstreamStatus { .. }) => "http_error",
            Err(VegvisirError::UpstreamTimeout { .. }) => "timeout",
            Err(_) => "transport",
        };
        metrics::counter!(telemetry::UPSTREAM_FETCHES_TOTAL, "outcome" => outcome).increment(1);
        result
    }

    async fn fetch_inner(&self, resource: Resource, raw_query: Option<&str>) -> Result<Value> {
        let url = self.request_url(resource, raw_query);
        debug!(resource = resource.name(), %url, "fetching upstream");

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            // Body read failures on an error response don't mask the status
            let body = response.text().await.unwrap_or_default();
            return Err(VegvisirError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let declared_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));

        let text = response.text().await.map_err(|e| self.classify(e))?;

        if declared_json {
            serde_json::from_str(&text).map_err(|e| {
                VegvisirError::Transport(format!("undecodable JSON from upstream: {e}"))
            })
        } else {
            // Opaque text bodies are wrapped so the cache always holds JSON
            Ok(json!({ "raw": text }))
        }
    }

    fn request_url(&self, resource: Resource, raw_query: Option<&str>) -> String {
        let mut url = format!("{}/{}", self.base_url, resource.name());
        if let Some(query) = raw_query
            && !query.is_empty()
        {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    fn classify(&self, e: reqwest::Error) -> VegvisirError {
        if e.is_timeout() {
            VegvisirError::UpstreamTimeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            VegvisirError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl Origin for UpstreamClient {
    fn name(&self) -> &str {
        "upstream-http"
    }

    async fn fetch(&self, resource: Resource, raw_query: Option<&str>) -> Result<Value> {
        self.fetch_resource(resource, raw_query).await
    }
}
