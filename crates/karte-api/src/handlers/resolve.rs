//! Anonymous link resolution handler.

use axum::Json;
use axum::extract::{Path, State};

use karte_core::error::AppError;
use karte_service::LinkStatus;

use crate::dto::response::{ApiResponse, ResolvedLink};
use crate::error::ApiError;
use crate::state::AppState;

/// The single user-visible rejection for any bad token. Expired, revoked,
/// never-issued, and already-used tokens are indistinguishable on the wire
/// so the endpoint cannot be used to probe the token space.
const LINK_REJECTED: &str = "This link is no longer valid";

/// GET /r/{token}
pub async fn resolve_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<ResolvedLink>>, ApiError> {
    match state.link_service.validate(&token).await? {
        LinkStatus::Valid(link) => Ok(Json(ApiResponse::ok(ResolvedLink {
            resource: link.resource.clone(),
            expires_at: link.expires_at,
        }))),
        LinkStatus::Expired | LinkStatus::Invalid => {
            Err(AppError::not_found(LINK_REJECTED).into())
        }
    }
}
