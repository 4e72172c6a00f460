//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create link request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Opaque reference to the report being shared,
    /// e.g. `patient:42/report.pdf`.
    #[validate(length(min = 1, message = "Resource reference is required"))]
    pub resource: String,
    /// Validity window in hours. Defaults to the configured ttl.
    pub ttl_hours: Option<i64>,
}

/// Query parameters for listing links by resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLinksQuery {
    /// The resource reference to list links for.
    pub resource: String,
}
