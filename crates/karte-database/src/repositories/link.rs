//! PostgreSQL link store implementation.
//!
//! All queries are parameterized; the token and resource strings never
//! reach the database as inline SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use karte_core::error::{AppError, ErrorKind};
use karte_core::result::AppResult;
use karte_entity::ReportLink;

use crate::store::LinkStore;

/// Link store backed by the `report_links` table.
#[derive(Debug, Clone)]
pub struct PgLinkStore {
    pool: PgPool,
}

impl PgLinkStore {
    /// Create a new Postgres link store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn put(&self, link: &ReportLink) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO report_links (token, resource, issued_at, expires_at, used) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&link.token)
        .bind(&link.resource)
        .bind(link.issued_at)
        .bind(link.expires_at)
        .bind(link.used)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::conflict("Link token already exists")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to insert link", e)
            }
        })?;
        Ok(())
    }

    async fn get(&self, token: &str) -> AppResult<Option<ReportLink>> {
        sqlx::query_as::<_, ReportLink>("SELECT * FROM report_links WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link", e))
    }

    async fn set_used(&self, token: &str) -> AppResult<bool> {
        // The WHERE clause is the compare-and-set: the row-level lock
        // guarantees at most one statement observes used = FALSE.
        let result = sqlx::query("UPDATE report_links SET used = TRUE WHERE token = $1 AND used = FALSE")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to mark link used", e)
            })?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM report_links WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete link", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM report_links WHERE expires_at <= $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expired links", e)
            })?;
        Ok(result.rows_affected())
    }

    async fn list_by_resource(
        &self,
        resource: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ReportLink>> {
        sqlx::query_as::<_, ReportLink>(
            "SELECT * FROM report_links WHERE resource = $1 AND expires_at > $2 \
             ORDER BY issued_at DESC",
        )
        .bind(resource)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list links", e))
    }
}
