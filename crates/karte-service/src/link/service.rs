//! Link lifecycle service.
//!
//! A link moves through four externally observable states: active,
//! consumed (single-use policy only), expired, and absent. Only `issue`
//! creates rows, only `set_used` mutates one (a one-way flag), and
//! `revoke`/`cleanup` delete. Expiry is a logical predicate over the
//! injected clock — validation never depends on the sweep having run.

use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use karte_core::config::links::LinksConfig;
use karte_core::error::{AppError, ErrorKind};
use karte_core::result::AppResult;
use karte_core::traits::Clock;
use karte_database::LinkStore;
use karte_entity::ReportLink;

use super::token::LinkTokenGenerator;

/// Upper bound on a requested ttl. A year is already far beyond any
/// clinical retention window; anything larger is a caller bug, and
/// unchecked values near `i64::MAX` would overflow the expiry arithmetic.
const MAX_TTL_HOURS: i64 = 24 * 366;

/// Outcome of presenting a token for validation.
///
/// `Expired` and `Invalid` are distinguished internally for logging, but
/// the HTTP boundary collapses both into one uniform rejection so the
/// response cannot be used as a token-enumeration oracle.
#[derive(Debug, Clone)]
pub enum LinkStatus {
    /// The grant is live; access to the referenced report is authorized.
    Valid(ReportLink),
    /// The grant exists but its validity window has passed.
    Expired,
    /// The token is unknown, revoked, or already consumed.
    Invalid,
}

impl LinkStatus {
    /// Whether this outcome authorizes access.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Orchestrates link issuance, validation, revocation, and expiry sweeps.
#[derive(Debug, Clone)]
pub struct LinkService {
    /// Durable token → grant mapping.
    store: Arc<dyn LinkStore>,
    /// Token generator.
    generator: LinkTokenGenerator,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Issuance and policy settings.
    config: LinksConfig,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(store: Arc<dyn LinkStore>, clock: Arc<dyn Clock>, config: LinksConfig) -> Self {
        Self {
            store,
            generator: LinkTokenGenerator::new(),
            clock,
            config,
        }
    }

    /// Issues a new link for `resource`, valid for `ttl_hours` (default
    /// from configuration).
    ///
    /// The returned grant carries the only full copy of the token the
    /// subsystem ever hands out. A token that failed to persist is never
    /// returned, so the caller cannot build a URL from a phantom grant.
    pub async fn issue(&self, resource: &str, ttl_hours: Option<i64>) -> AppResult<ReportLink> {
        let resource = resource.trim();
        if resource.is_empty() {
            return Err(AppError::validation("Resource reference must not be empty"));
        }
        let ttl_hours = ttl_hours.unwrap_or(self.config.default_ttl_hours);
        if ttl_hours <= 0 || ttl_hours > MAX_TTL_HOURS {
            return Err(AppError::validation(format!(
                "Link ttl must be between 1 and {MAX_TTL_HOURS} hours",
            )));
        }

        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add_signed(Duration::hours(ttl_hours))
            .ok_or_else(|| AppError::validation("Link ttl overflows the expiry timestamp"))?;
        let mut link = ReportLink {
            token: self.generator.generate(),
            resource: resource.to_string(),
            issued_at,
            expires_at,
            used: false,
        };

        match self.store.put(&link).await {
            Ok(()) => {}
            Err(e) if e.kind == ErrorKind::Conflict => {
                // A 256-bit collision. Retry once with a fresh token; a
                // second collision means the entropy source is broken.
                warn!("Link token collision on insert, regenerating");
                link.token = self.generator.generate();
                match self.store.put(&link).await {
                    Ok(()) => {}
                    Err(e) if e.kind == ErrorKind::Conflict => {
                        return Err(AppError::conflict(
                            "Token collision repeated after retry; entropy source suspect",
                        ));
                    }
                    Err(e) => return Err(store_unavailable(e)),
                }
            }
            Err(e) => return Err(store_unavailable(e)),
        }

        info!(
            resource = %link.resource,
            token_prefix = %link.token_fragment(),
            expires_at = %link.expires_at,
            "Report link issued"
        );

        Ok(link)
    }

    /// Validates a presented token.
    ///
    /// Under single-use policy this is a consuming validation: the
    /// store-level compare-and-set is part of the same logical operation,
    /// and losing that race downgrades the outcome to `Invalid` even
    /// though the initial read saw an unconsumed grant.
    pub async fn validate(&self, token: &str) -> AppResult<LinkStatus> {
        let found = self.store.get(token).await.map_err(store_unavailable)?;
        let Some(mut link) = found else {
            return Ok(LinkStatus::Invalid);
        };

        if link.is_expired(self.clock.now()) {
            return Ok(LinkStatus::Expired);
        }

        if self.config.single_use {
            if link.used {
                return Ok(LinkStatus::Invalid);
            }
            let consumed = self
                .store
                .set_used(&link.token)
                .await
                .map_err(store_unavailable)?;
            if !consumed {
                info!(
                    token_prefix = %link.token_fragment(),
                    "Link redemption race lost, rejecting"
                );
                return Ok(LinkStatus::Invalid);
            }
            link.used = true;
        }

        Ok(LinkStatus::Valid(link))
    }

    /// Revokes a link outright. Idempotent: revoking an absent token is
    /// not an error.
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        let existed = self.store.delete(token).await.map_err(store_unavailable)?;
        if existed {
            info!(token_prefix = %fragment(token), "Report link revoked");
        }
        Ok(())
    }

    /// Deletes every expired link, returning the count removed.
    ///
    /// Advisory housekeeping only: `validate` rejects expired grants on
    /// its own, so the sweep cadence bounds storage growth, not
    /// correctness.
    pub async fn cleanup(&self) -> AppResult<u64> {
        let removed = self
            .store
            .delete_expired(self.clock.now())
            .await
            .map_err(store_unavailable)?;
        if removed > 0 {
            info!(removed, "Swept expired report links");
        }
        Ok(removed)
    }

    /// Non-expired links for one resource, most recently issued first.
    pub async fn list_for_resource(&self, resource: &str) -> AppResult<Vec<ReportLink>> {
        let resource = resource.trim();
        if resource.is_empty() {
            return Err(AppError::validation("Resource reference must not be empty"));
        }
        self.store
            .list_by_resource(resource, self.clock.now())
            .await
            .map_err(store_unavailable)
    }
}

/// Map a store failure to `ServiceUnavailable`, keeping the cause.
///
/// A transient outage must stay distinguishable from a token rejection:
/// callers may retry, but must not tell the patient the link is dead.
fn store_unavailable(err: AppError) -> AppError {
    match err.kind {
        ErrorKind::Database => {
            AppError::with_source(ErrorKind::ServiceUnavailable, "Link store unavailable", err)
        }
        _ => err,
    }
}

fn fragment(token: &str) -> &str {
    let end = token.char_indices().nth(8).map_or(token.len(), |(i, _)| i);
    &token[..end]
}
