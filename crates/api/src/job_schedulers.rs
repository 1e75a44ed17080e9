use crate::{
    reminder::run_sweep::{RunSweepUseCase, UseCaseError},
    shared::usecase::execute,
};
use actix_web::rt::time::interval;
use nudge_infra::NudgeContext;
use std::time::Duration;
use tracing::{info, warn};

/// Runs a reminder sweep every `interval_secs` seconds inside this process.
/// Sweeps triggered over http at the same time are rejected by the sweep lock.
pub fn start_sweep_job(ctx: NudgeContext, interval_secs: u64) {
    actix_web::rt::spawn(async move {
        let mut sweep_interval = interval(Duration::from_secs(interval_secs));
        // The first tick completes immediately
        sweep_interval.tick().await;
        loop {
            sweep_interval.tick().await;
            match execute(RunSweepUseCase {}, &ctx).await {
                Ok(summary) => info!("Scheduled sweep: {}", summary.message()),
                Err(UseCaseError::SweepInProgress) => {
                    warn!("Skipping scheduled sweep, another sweep is still running")
                }
                // Already logged by the usecase executor
                Err(UseCaseError::StorageError) => (),
            }
        }
    });
}
