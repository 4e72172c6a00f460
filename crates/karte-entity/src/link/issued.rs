//! Issued link value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The one-time handoff of a freshly issued link to the staff caller.
///
/// This is the only place the full token leaves the subsystem; afterwards
/// it exists solely inside the URL given to the patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedLink {
    /// The bearer token, URL-safe as-is.
    pub token: String,
    /// The full URL for anonymous access.
    pub url: String,
    /// When the link expires.
    pub expires_at: DateTime<Utc>,
}
