//! Countdown tick task

use std::sync::Arc;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info};

use crate::{engine::TickOutcome, state::AppState};

/// Spawn the periodic tick for the countdown started as `generation`
pub fn spawn_countdown(state: Arc<AppState>, generation: u64) -> JoinHandle<()> {
    tokio::spawn(countdown_task(state, generation))
}

/// Deliver one tick per period until the countdown finishes or is cancelled.
///
/// The first tick fires one full period after start. Each tick subtracts
/// exactly one second regardless of scheduler jitter.
pub async fn countdown_task(state: Arc<AppState>, generation: u64) {
    info!("Starting countdown task #{}", generation);

    let period = state.tick_period;
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        match state.tick(generation) {
            Ok(outcome) if outcome.keeps_ticking() => {}
            Ok(TickOutcome::Finished(_)) => {
                info!("Countdown #{} complete", generation);
                break;
            }
            Ok(_) => {
                debug!("Countdown #{} no longer registered, exiting", generation);
                break;
            }
            Err(e) => {
                error!("Countdown #{} tick failed: {}", generation, e);
                break;
            }
        }
    }
}
