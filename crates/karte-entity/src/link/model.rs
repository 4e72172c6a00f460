//! Report link entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How many leading token characters may appear in logs and admin views.
const TOKEN_FRAGMENT_LEN: usize = 8;

/// A capability grant binding a bearer token to one stored report.
///
/// The token itself is the credential: anyone presenting it within the
/// validity window may fetch the referenced report, with no session or
/// identity involved. The row is immutable after creation except for the
/// one-way `used` flag; revocation deletes the row.
#[derive(Clone, Serialize, Deserialize, FromRow)]
pub struct ReportLink {
    /// The bearer token. Never serialized back out and never logged in
    /// full; issuance hands it to the caller once via [`super::IssuedLink`].
    #[serde(skip_serializing)]
    pub token: String,
    /// Opaque reference to the protected report, e.g.
    /// `patient:42/report.pdf`. The link subsystem does not interpret it.
    pub resource: String,
    /// When the link was issued.
    pub issued_at: DateTime<Utc>,
    /// Absolute expiry instant (`issued_at + ttl`).
    pub expires_at: DateTime<Utc>,
    /// Whether the link has been consumed under single-use policy.
    pub used: bool,
}

impl ReportLink {
    /// Whether the link is expired at `now`. A link is live strictly
    /// before its expiry instant; at `expires_at` it is already dead.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// A short token prefix safe to include in logs and listings.
    pub fn token_fragment(&self) -> &str {
        let end = self
            .token
            .char_indices()
            .nth(TOKEN_FRAGMENT_LEN)
            .map_or(self.token.len(), |(i, _)| i);
        &self.token[..end]
    }
}

// Hand-written so the bearer token cannot leak through debug logging.
impl fmt::Debug for ReportLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportLink")
            .field("token", &format!("{}…", self.token_fragment()))
            .field("resource", &self.resource)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("used", &self.used)
            .finish()
    }
}
