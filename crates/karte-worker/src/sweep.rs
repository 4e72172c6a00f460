//! Cron scheduler for the expired-link sweep.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use karte_core::error::AppError;
use karte_service::LinkService;

/// Cron-based scheduler for periodic background tasks.
pub struct SweepScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
}

impl std::fmt::Debug for SweepScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepScheduler").finish()
    }
}

impl SweepScheduler {
    /// Create a new sweep scheduler.
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler })
    }

    /// Register the link sweep on the given cron schedule.
    ///
    /// A failed sweep is logged and retried at the next tick; nothing else
    /// depends on it having run.
    pub async fn register_link_sweep(
        &self,
        service: Arc<LinkService>,
        schedule: &str,
    ) -> Result<(), AppError> {
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let service = Arc::clone(&service);
            Box::pin(async move {
                match service.cleanup().await {
                    Ok(removed) => {
                        tracing::debug!(removed, "Link sweep completed");
                    }
                    Err(e) => {
                        tracing::warn!("Link sweep failed: {}", e);
                    }
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create sweep job: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to register sweep job: {e}")))?;

        tracing::info!(%schedule, "Link sweep registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Sweep scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Sweep scheduler shut down");
        Ok(())
    }
}
