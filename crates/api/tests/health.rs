//! Health endpoint and cross-cutting HTTP behaviour (request ids, CORS).

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_ok_and_database_up(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
    assert!(
        json["version"].as_str().is_some_and(|v| !v.is_empty()),
        "version should be the crate version string"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn every_response_carries_a_request_id(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let ok = get(app, "/health").await;

    let id = ok
        .headers()
        .get("x-request-id")
        .expect("2xx responses carry x-request-id")
        .to_str()
        .expect("header should be ascii");
    assert_eq!(id.len(), 36, "request id should be a hyphenated UUID");

    // Error responses get one too.
    let app = common::build_test_app(pool);
    let missing = get(app, "/does-not-exist").await;
    assert!(
        missing.headers().get("x-request-id").is_some(),
        "404 responses carry x-request-id"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn preflight_allows_the_configured_origin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/lead/leads")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .expect("request should build");

    let response = app.oneshot(request).await.expect("request should not fail");
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    assert_eq!(
        headers
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true"),
        "cookie auth needs credentialed CORS"
    );
    let allow_methods = headers
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        allow_methods.contains("GET") && allow_methods.contains("DELETE"),
        "preflight should allow the API verbs, got: {allow_methods}"
    );
}
