//! Request handlers.
//!
//! Each handler extracts, delegates to the gateway, and maps the outcome
//! onto HTTP. Error bodies come from
//! [`VegvisirError::response_body`](crate::VegvisirError::response_body),
//! so the JSON shape is identical whether an error surfaces here or in an
//! embedding process.

use axum::Json;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::AppState;
use crate::VegvisirError;

/// Response header carrying the cache disposition (`HIT|MISS|STALE`).
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// `GET /api/traffic/{resource}` — the proxy endpoint.
pub async fn traffic(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    match state.gateway.handle_named(&resource, query.as_deref()).await {
        Ok(served) => (
            StatusCode::OK,
            [(X_CACHE, served.cache.as_str())],
            Json(served.payload),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /health` — liveness probe; never touches the upstream.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "uptime": state.started.elapsed().as_secs(),
        })),
    )
}

impl IntoResponse for VegvisirError {
    fn into_response(self) -> Response {
        // Upstream statuses come off the wire, so they always convert
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(self.response_body())).into_response()
    }
}
