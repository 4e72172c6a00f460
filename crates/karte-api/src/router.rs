//! Route definitions for the Karte link HTTP API.
//!
//! Staff administration routes live under `/api`; the anonymous resolver
//! sits at the root as `/r/{token}` so issued URLs stay short.

use axum::http::HeaderValue;
use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(link_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .route("/r/{token}", get(handlers::resolve::resolve_link))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Link administration endpoints for the staff UI.
fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(handlers::link::create_link))
        .route("/links", get(handlers::link::list_links))
        .route("/links/sweep", post(handlers::link::sweep_links))
        .route("/links/{token}", delete(handlers::link::revoke_link))
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors.allowed_origins;

    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}
