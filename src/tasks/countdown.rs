//! Countdown tick driver background task

use std::sync::Arc;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that advances the countdown once per configured period.
///
/// The engine never manages time itself; this task is the external scheduler.
/// It parks on the timer watch channel until a run begins, then races a fixed
/// interval against further snapshots so a cancel takes effect without
/// waiting for the next tick.
pub async fn countdown_tick_task(state: Arc<AppState>) {
    info!("Starting countdown tick driver");

    let mut updates = state.subscribe_timer();

    loop {
        // Park until a countdown is running.
        while !updates.borrow_and_update().running {
            if updates.changed().await.is_err() {
                info!("Timer channel closed, stopping tick driver");
                return;
            }
        }

        info!(
            "Countdown running, ticking every {:?}",
            state.tick_interval
        );

        let mut interval = time::interval(state.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick completes immediately; consume it so the
        // countdown does not lose a second at start.
        interval.tick().await;

        loop {
            tokio::select! {
                // Tick - advance the countdown by one second
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(timer) => {
                            debug!("Tick: {} remaining", timer.display());
                            if !timer.running {
                                info!("Countdown finished");
                                break;
                            }
                        }
                        Err(e) => {
                            error!("Failed to advance countdown: {}", e);
                            break;
                        }
                    }
                }

                // Snapshot - check if the run was cancelled
                changed = updates.changed() => {
                    if changed.is_err() {
                        info!("Timer channel closed, stopping tick driver");
                        return;
                    }
                    if !updates.borrow_and_update().running {
                        info!("Countdown cancelled, tick driver parked");
                        break;
                    }
                }
            }
        }
    }
}
