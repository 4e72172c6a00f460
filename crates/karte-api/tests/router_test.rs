//! End-to-end router tests over the in-memory store.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use karte_core::config::AppConfig;
use karte_core::config::database::DatabaseConfig;
use karte_core::config::links::LinksConfig;
use karte_core::config::logging::LoggingConfig;
use karte_core::config::server::{CorsConfig, ServerConfig};
use karte_core::traits::{Clock, SystemClock};
use karte_database::{LinkStore, MemoryLinkStore};
use karte_service::LinkService;

use karte_api::{AppState, build_router};

fn test_app(single_use: bool) -> Router {
    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig::default(),
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        links: LinksConfig {
            single_use,
            public_base_url: "https://records.example.test".to_string(),
            ..LinksConfig::default()
        },
        logging: LoggingConfig::default(),
    };

    let store = Arc::new(MemoryLinkStore::new()) as Arc<dyn LinkStore>;
    let clock = Arc::new(SystemClock) as Arc<dyn Clock>;
    let service = Arc::new(LinkService::new(store, clock, config.links.clone()));

    build_router(AppState::new(Arc::new(config), service))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn issue(app: &Router, resource: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/links",
            serde_json::json!({ "resource": resource, "ttl_hours": 48 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_issue_returns_token_and_url() {
    let app = test_app(false);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/links",
            serde_json::json!({ "resource": "patient:42/report.pdf" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(token.len(), 64);
    assert_eq!(
        body["data"]["url"].as_str().unwrap(),
        format!("https://records.example.test/r/{token}")
    );
}

#[tokio::test]
async fn test_issue_rejects_invalid_ttl() {
    let app = test_app(false);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/links",
            serde_json::json!({ "resource": "patient:42/report.pdf", "ttl_hours": 0 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    // A ttl near i64::MAX must come back as a 400, not crash the handler.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/links",
            serde_json::json!({ "resource": "patient:42/report.pdf", "ttl_hours": i64::MAX }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_resolve_round_trip() {
    let app = test_app(false);
    let token = issue(&app, "patient:42/report.pdf").await;

    let (status, body) = send(&app, empty_request("GET", &format!("/r/{token}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["resource"], "patient:42/report.pdf");
    assert!(body["data"].get("token").is_none());
}

#[tokio::test]
async fn test_rejections_are_uniform() {
    let app = test_app(false);
    let token = issue(&app, "patient:42/report.pdf").await;

    // Revoked link and never-issued token must be indistinguishable.
    let (status, _) = send(&app, empty_request("DELETE", &format!("/api/links/{token}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (revoked_status, revoked_body) =
        send(&app, empty_request("GET", &format!("/r/{token}"))).await;
    let (unknown_status, unknown_body) =
        send(&app, empty_request("GET", &format!("/r/{}", "0".repeat(64)))).await;

    assert_eq!(revoked_status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_status, StatusCode::NOT_FOUND);
    assert_eq!(revoked_body, unknown_body);
}

#[tokio::test]
async fn test_single_use_link_resolves_once() {
    let app = test_app(true);
    let token = issue(&app, "patient:9/rx.pdf").await;

    let (first, _) = send(&app, empty_request("GET", &format!("/r/{token}"))).await;
    let (second, _) = send(&app, empty_request("GET", &format!("/r/{token}"))).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_withholds_tokens() {
    let app = test_app(false);
    issue(&app, "patient:5/mri.pdf").await;
    issue(&app, "patient:5/mri.pdf").await;

    let (status, body) = send(
        &app,
        empty_request("GET", "/api/links?resource=patient:5/mri.pdf"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let links = body["data"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    for link in links {
        assert!(link.get("token").is_none());
        assert_eq!(link["token_prefix"].as_str().unwrap().len(), 8);
    }
}

#[tokio::test]
async fn test_manual_sweep_reports_count() {
    let app = test_app(false);
    issue(&app, "patient:1/a.pdf").await;

    let (status, body) = send(&app, empty_request("POST", "/api/links/sweep")).await;

    assert_eq!(status, StatusCode::OK);
    // Nothing has expired yet.
    assert_eq!(body["data"]["removed"], 0);
}

#[tokio::test]
async fn test_health() {
    let app = test_app(false);
    let (status, body) = send(&app, empty_request("GET", "/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}
