//! Request/response logging middleware.

use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

/// Logs request method, path, status, and duration.
///
/// Only the path is logged, never the query string or the `/r/{token}`
/// path parameter value beyond what the route itself exposes.
pub async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = scrub_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "HTTP request"
    );

    response
}

/// Replace the token segment of resolution URLs so bearer tokens never
/// reach the access log.
fn scrub_path(path: &str) -> String {
    match path.strip_prefix("/r/") {
        Some(rest) if !rest.is_empty() => {
            let end = rest.char_indices().nth(8).map_or(rest.len(), |(i, _)| i);
            format!("/r/{}…", &rest[..end])
        }
        _ => path.to_string(),
    }
}
