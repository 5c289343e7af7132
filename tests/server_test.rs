#![cfg(feature = "server")]

//! Integration tests for the HTTP surface — routing, status mapping, the
//! `X-Cache` header, and the health probe. Requests are driven straight
//! into the router with `tower::ServiceExt::oneshot`; upstream behaviour
//! comes from wiremock.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vegvisir::Vegvisir;
use vegvisir::server::build_router;

fn router_for(server: &MockServer, fresh_ttl: Duration) -> Router {
    let gateway = Vegvisir::builder()
        .upstream_url(server.uri())
        .fresh_ttl(fresh_ttl)
        .fetch_timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    build_router(Arc::new(gateway))
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let x_cache = response
        .headers()
        .get("x-cache")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, x_cache, body)
}

// ============================================================================
// Proxy endpoint
// ============================================================================

#[tokio::test]
async fn proxied_resource_reports_miss_then_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/findCamerasAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cameras": [1, 2]})))
        .expect(1)
        .mount(&server)
        .await;

    let router = router_for(&server, Duration::from_secs(30));

    let (status, x_cache, body) = get(&router, "/api/traffic/findCamerasAll").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(x_cache.as_deref(), Some("MISS"));
    assert_eq!(body, json!({"cameras": [1, 2]}));

    let (status, x_cache, body) = get(&router, "/api/traffic/findCamerasAll").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(x_cache.as_deref(), Some("HIT"));
    assert_eq!(body, json!({"cameras": [1, 2]}));
}

#[tokio::test]
async fn query_strings_are_forwarded_and_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/findWaysByRegion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ways": []})))
        .expect(1)
        .mount(&server)
        .await;

    let router = router_for(&server, Duration::from_secs(30));

    let (_, x_cache, _) = get(&router, "/api/traffic/findWaysByRegion?region=3").await;
    assert_eq!(x_cache.as_deref(), Some("MISS"));

    // Same parameters, same entry; expect(1) holds the upstream to one call.
    let (_, x_cache, _) = get(&router, "/api/traffic/findWaysByRegion?region=3").await;
    assert_eq!(x_cache.as_deref(), Some("HIT"));
}

#[tokio::test]
async fn unknown_resource_is_a_400_with_no_upstream_call() {
    let server = MockServer::start().await;
    // No mocks mounted: any request reaching the server would 404 and the
    // test below would report an upstream error instead of a 400.

    let router = router_for(&server, Duration::from_secs(30));

    let (status, x_cache, body) = get(&router, "/api/traffic/findDragonsAll").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(x_cache, None, "error responses carry no cache header");
    assert_eq!(body, json!({"error": "Unsupported resource"}));
}

// ============================================================================
// Upstream failure mapping
// ============================================================================

#[tokio::test]
async fn upstream_error_status_passes_through_with_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/findRoadEventsAll"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let router = router_for(&server, Duration::from_secs(30));

    let (status, _, body) = get(&router, "/api/traffic/findRoadEventsAll").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Upstream error");
    assert_eq!(body["detail"], "overloaded");
}

#[tokio::test]
async fn upstream_timeout_is_a_504() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/findJourneysAll"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"journeys": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let router = router_for(&server, Duration::from_secs(30));

    let (status, _, body) = get(&router, "/api/traffic/findJourneysAll").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, json!({"error": "Upstream timeout"}));
}

#[tokio::test]
async fn stale_fallback_serves_200_with_stale_header_and_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/findVmsSignsAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"signs": [7]})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/findVmsSignsAll"))
        .respond_with(ResponseTemplate::new(500).set_body_string("crashed"))
        .mount(&server)
        .await;

    // Short TTL so the fresh entry is gone by the second request.
    let router = router_for(&server, Duration::from_millis(50));

    let (_, x_cache, _) = get(&router, "/api/traffic/findVmsSignsAll").await;
    assert_eq!(x_cache.as_deref(), Some("MISS"));

    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, x_cache, body) = get(&router, "/api/traffic/findVmsSignsAll").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(x_cache.as_deref(), Some("STALE"));
    assert_eq!(body["signs"], json!([7]));
    assert_eq!(body["warning"], vegvisir::STALE_WARNING);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_reports_ok_and_uptime() {
    let server = MockServer::start().await;
    let router = router_for(&server, Duration::from_secs(30));

    let (status, x_cache, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(x_cache, None);
    assert_eq!(body["ok"], true);
    assert!(body["uptime"].is_u64());
}

#[tokio::test]
async fn unrouted_paths_are_404() {
    let server = MockServer::start().await;
    let router = router_for(&server, Duration::from_secs(30));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/other")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
