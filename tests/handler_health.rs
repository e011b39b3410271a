mod common;

use axum::http::StatusCode;
use common::TestApp;
use shortlink::api::dto::health::HealthResponse;
use shortlink::infrastructure::cache::NullCache;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use std::sync::Arc;

#[tokio::test]
async fn test_health_check_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    response.assert_status_ok();
    let body: HealthResponse = response.json();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.checks.database.status, "ok");
    assert_eq!(body.checks.cache.status, "ok");
}

#[tokio::test]
async fn test_health_with_cache_disabled() {
    let server = common::server_with(
        Arc::new(MemoryLinkRepository::new()),
        Arc::new(NullCache::new()),
    );

    let response = server
        .get("/health")
        .add_header("X-Forwarded-For", common::CLIENT_IP)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: HealthResponse = response.json();
    assert_eq!(body.checks.cache.message.as_deref(), Some("Cache disabled"));
}
