//! The link store contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use karte_core::AppResult;
use karte_entity::ReportLink;

/// Durable mapping from token to link grant.
///
/// The store may be shared across service instances, so every mutation that
/// matters for correctness is atomic at the storage layer: `put` is
/// all-or-nothing per key and `set_used` is a compare-and-set. Errors are
/// reported with `ErrorKind::Conflict` for a duplicate token on `put` and
/// `ErrorKind::Database` for infrastructure failures.
#[async_trait]
pub trait LinkStore: Send + Sync + std::fmt::Debug {
    /// Insert a new link. Fails with a conflict if the token already exists;
    /// an existing grant is never silently overwritten.
    async fn put(&self, link: &ReportLink) -> AppResult<()>;

    /// Fetch a link by token.
    async fn get(&self, token: &str) -> AppResult<Option<ReportLink>>;

    /// Atomically transition `used` from `false` to `true`.
    ///
    /// Returns `true` only for the call that performed the transition.
    /// Concurrent callers racing on the same token see exactly one winner;
    /// the rest (and calls on absent or already-used tokens) get `false`.
    async fn set_used(&self, token: &str) -> AppResult<bool>;

    /// Delete a link. Returns `true` if a row existed.
    async fn delete(&self, token: &str) -> AppResult<bool>;

    /// Delete every link with `expires_at <= cutoff`, returning the count.
    ///
    /// The cutoff is supplied by the caller so that clock skew between the
    /// service and the store cannot delete links that are still live.
    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    /// Non-expired links for one resource, most recently issued first.
    /// Each call re-reads current state; no cursor is retained.
    async fn list_by_resource(
        &self,
        resource: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ReportLink>>;
}
