//! Background location refresh.
//!
//! Registers a recurring refresh job when `KIDSPOTS_REFRESH_CRON` is set.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::api::AppState;
use crate::refresh::refresh_locations;

/// Builds and starts the background job scheduler with one refresh job on
/// `schedule` (six-field cron, seconds first).
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process. Dropping it shuts down the job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// `schedule` is not a valid cron expression, or the scheduler fails to start.
pub async fn build_scheduler(
    state: AppState,
    schedule: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let state = state.clone();
        Box::pin(async move {
            run_refresh_job(&state).await;
        })
    })?;
    scheduler.add(job).await?;

    scheduler.start().await?;
    tracing::info!(schedule, "scheduler: location refresh job registered");
    Ok(scheduler)
}

/// Runs one refresh outside a request. Failures are logged; the store keeps
/// its previous collection.
pub async fn run_refresh_job(state: &AppState) {
    tracing::info!("scheduler: starting location refresh");
    match refresh_locations(&state.overpass, &state.store, &state.region).await {
        Ok(outcome) => tracing::info!(
            count = outcome.count,
            skipped = outcome.skipped,
            "scheduler: location refresh complete"
        ),
        Err(e) => tracing::error!(
            error = %e,
            "scheduler: location refresh failed; keeping previous locations"
        ),
    }
}
