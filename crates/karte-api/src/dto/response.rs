//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for success responses.
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Server version.
    pub version: String,
}

/// Body returned to an anonymous caller whose token validated.
///
/// Carries the authorization decision for the records application, which
/// then streams the referenced artifact. Never echoes the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLink {
    /// The authorized resource reference.
    pub resource: String,
    /// When the authorization lapses.
    pub expires_at: DateTime<Utc>,
}
