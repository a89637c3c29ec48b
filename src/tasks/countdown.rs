//! Pomodoro countdown background task

use std::{sync::Weak, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome};

/// Tick the Pomodoro timer of run `run_id` once per `period` until the run ends.
///
/// Holds only a weak reference so that dropping the application state is
/// never delayed by a pending countdown.
pub async fn countdown_task(state: Weak<AppState>, run_id: u64, period: Duration) {
    info!("Starting countdown for run {}", run_id);

    let mut interval = interval_at(Instant::now() + period, period);
    // Late ticks are not caught up in a burst
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(state) = state.upgrade() else {
            debug!("Application state gone, ending countdown for run {}", run_id);
            break;
        };

        match state.apply_tick(run_id) {
            Ok(TickOutcome::Ticked { .. }) => continue,
            Ok(TickOutcome::Completed { cycle }) => {
                info!("Countdown for run {} finished a {} cycle", run_id, cycle.label());
                break;
            }
            Ok(TickOutcome::Inactive) => {
                debug!("Run {} is no longer running, ending countdown", run_id);
                break;
            }
            Err(e) => {
                error!("Failed to apply countdown tick: {}", e);
                break;
            }
        }
    }
}
