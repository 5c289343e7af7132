//! Vegvisir error types

use serde_json::{Value, json};

/// Vegvisir error types
#[derive(Debug, thiserror::Error)]
pub enum VegvisirError {
    // Client-caused errors
    #[error("unsupported resource: {0}")]
    UnsupportedResource(String),

    // Upstream errors
    /// Upstream answered with a non-2xx status. Carries the raw response
    /// body so the caller can surface it as the error detail.
    #[error("upstream returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("upstream timed out after {timeout_ms}ms")]
    UpstreamTimeout { timeout_ms: u64 },

    /// Network failure or an undecodable body on a declared-JSON response.
    #[error("transport error: {0}")]
    Transport(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Anything unexpected
    #[error("internal error: {0}")]
    Internal(String),
}

impl VegvisirError {
    /// True for failures originating upstream, the only errors the
    /// orchestrator masks with a stale cache entry.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            VegvisirError::UpstreamStatus { .. }
                | VegvisirError::UpstreamTimeout { .. }
                | VegvisirError::Transport(_)
        )
    }

    /// HTTP status this error surfaces as when no fallback applies.
    ///
    /// Upstream HTTP errors keep their original status; timeouts and
    /// unclassified failures map to 504, transport failures to 502.
    pub fn http_status(&self) -> u16 {
        match self {
            VegvisirError::UnsupportedResource(_) => 400,
            VegvisirError::UpstreamStatus { status, .. } => *status,
            VegvisirError::UpstreamTimeout { .. } => 504,
            VegvisirError::Transport(_) => 502,
            VegvisirError::Configuration(_) => 500,
            VegvisirError::Internal(_) => 504,
        }
    }

    /// JSON body this error surfaces as. Always carries an `error` field;
    /// upstream failures add a `detail` field with the raw body or cause.
    pub fn response_body(&self) -> Value {
        match self {
            VegvisirError::UnsupportedResource(_) => {
                json!({ "error": "Unsupported resource" })
            }
            VegvisirError::UpstreamStatus { body, .. } => {
                json!({ "error": "Upstream error", "detail": body })
            }
            VegvisirError::UpstreamTimeout { .. } => {
                json!({ "error": "Upstream timeout" })
            }
            VegvisirError::Transport(message) => {
                json!({ "error": "Upstream error", "detail": message })
            }
            VegvisirError::Configuration(_) | VegvisirError::Internal(_) => {
                json!({ "error": "Proxy error" })
            }
        }
    }
}

/// Result type alias for Vegvisir operations
pub type Result<T> = std::result::Result<T, VegvisirError>;
