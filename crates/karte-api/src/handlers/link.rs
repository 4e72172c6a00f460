//! Staff-facing link administration handlers.
//!
//! These sit behind the records application's normal staff authentication,
//! which is applied by the host router; nothing here is reachable
//! anonymously except through that outer layer.

use axum::Json;
use axum::extract::{Path, Query, State};
use validator::Validate;

use karte_core::error::AppError;
use karte_entity::IssuedLink;

use crate::dto::request::{CreateLinkRequest, ListLinksQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/links
pub async fn create_link(
    State(state): State<AppState>,
    Json(req): Json<CreateLinkRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let link = state
        .link_service
        .issue(&req.resource, req.ttl_hours)
        .await?;

    let base = state.config.links.public_base_url.trim_end_matches('/');
    let issued = IssuedLink {
        url: format!("{base}/r/{}", link.token),
        token: link.token,
        expires_at: link.expires_at,
    };

    Ok(Json(serde_json::json!({ "success": true, "data": issued })))
}

/// GET /api/links?resource=...
pub async fn list_links(
    State(state): State<AppState>,
    Query(params): Query<ListLinksQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let links = state.link_service.list_for_resource(&params.resource).await?;

    // Entity serialization already withholds the token; attach the display
    // fragment staff need to tell links apart.
    let data: Vec<serde_json::Value> = links
        .iter()
        .map(|link| {
            let mut value = serde_json::to_value(link).unwrap_or_default();
            if let Some(map) = value.as_object_mut() {
                map.insert(
                    "token_prefix".to_string(),
                    serde_json::Value::String(link.token_fragment().to_string()),
                );
            }
            value
        })
        .collect();

    Ok(Json(serde_json::json!({ "success": true, "data": data })))
}

/// DELETE /api/links/{token}
pub async fn revoke_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.link_service.revoke(&token).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Link revoked" } }),
    ))
}

/// POST /api/links/sweep
pub async fn sweep_links(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = state.link_service.cleanup().await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "removed": removed } }),
    ))
}
