//! Recurring sync jobs.
//!
//! Two cron jobs per configured store:
//! - catalog sync at 00:00 and 12:00 (creations, disables, prices, media)
//! - stock sync at the top of every hour
//!
//! Job failures are logged and the schedule keeps running; a transient
//! supplier outage must not take the whole scheduler down.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{error, info};

use crate::state::AppState;

/// Twice a day, at midnight and noon.
const CATALOG_SCHEDULE: &str = "0 0 0,12 * * *";
/// Top of every hour.
const STOCK_SCHEDULE: &str = "0 0 * * * *";

/// Build and start the job scheduler for every configured store.
///
/// # Errors
///
/// Returns an error when a cron expression fails to parse or the
/// scheduler cannot start.
pub async fn start(state: &AppState) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    for service in state.services() {
        let catalog_service = service.clone();
        scheduler
            .add(Job::new_async(CATALOG_SCHEDULE, move |_id, _lock| {
                let service = catalog_service.clone();
                Box::pin(async move {
                    match service.run_daily().await {
                        Ok(summary) => info!(store = service.store(), ?summary, "catalog sync finished"),
                        Err(err) => error!(store = service.store(), error = %err, "catalog sync failed"),
                    }
                })
            })?)
            .await?;

        let stock_service = service.clone();
        scheduler
            .add(Job::new_async(STOCK_SCHEDULE, move |_id, _lock| {
                let service = stock_service.clone();
                Box::pin(async move {
                    match service.run_hourly().await {
                        Ok(summary) => info!(store = service.store(), ?summary, "stock sync finished"),
                        Err(err) => error!(store = service.store(), error = %err, "stock sync failed"),
                    }
                })
            })?)
            .await?;
    }

    scheduler.start().await?;
    Ok(scheduler)
}
