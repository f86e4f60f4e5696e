//! Hourly sweep closing expired suspensions.

use std::time::Duration;

use chrono::Utc;
use ringside_api::suspensions::SuspensionStatus;
use tokio::time::{self, MissedTickBehavior};

use crate::state::State;
use crate::Error;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Spawns the background sweep task. It runs until shutdown; every
/// failure is logged and retried on the next tick.
pub fn spawn(state: State) {
    tokio::task::spawn(async move {
        let mut interval = time::interval(SWEEP_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => (),
                _ = state.shutdown.listen() => {
                    log::debug!("Stopping suspension sweeper");
                    return;
                }
            }

            match sweep(&state).await {
                Ok(0) => (),
                Ok(closed) => log::info!("Closed {} expired suspensions", closed),
                Err(err) => log::error!("Suspension sweep failed: {}", err),
            }
        }
    });
}

/// Closes every active, time-bound suspension whose window has
/// elapsed. Indefinite suspensions and medical suspensions without
/// clearance are skipped.
async fn sweep(state: &State) -> Result<usize, Error> {
    let suspensions = state
        .store
        .suspensions()
        .list(Some(SuspensionStatus::Active))
        .await?;

    let now = Utc::now();
    let mut closed = 0;

    for mut suspension in suspensions {
        if !suspension.is_expired(now) {
            continue;
        }

        suspension.status = SuspensionStatus::Closed;
        state
            .store
            .suspensions()
            .update(suspension.id, &suspension)
            .await?;

        closed += 1;
    }

    Ok(closed)
}
