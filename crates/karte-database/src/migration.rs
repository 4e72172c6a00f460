//! Schema migrations for the link store.

use sqlx::PgPool;
use tracing::info;

use karte_core::error::{AppError, ErrorKind};

/// Bring the `report_links` schema up to date.
///
/// Runs at startup before any repository is constructed, so the service
/// never races a half-applied schema.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");
    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!("Link store schema is current");
    Ok(())
}
