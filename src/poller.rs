use tokio::time::MissedTickBehavior;

use crate::error::ApiResult;
use crate::state::AppState;

/// Fetch all lights from the bridge, and replace the cached copy.
pub async fn poll(state: &AppState) -> ApiResult<usize> {
    let lights = state.client().get_lights().await?;
    let count = lights.len();

    state.cache.lock().await.replace(lights);

    Ok(count)
}

pub async fn run_forever(state: AppState) -> ApiResult<()> {
    let period = state.config().panel.poll_interval();
    log::info!("[poller] Polling lights every {}s", period.as_secs());

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        if !state.polling() {
            log::trace!("[poller] Polling paused");
            continue;
        }

        match poll(&state).await {
            Ok(count) => log::trace!("[poller] Refreshed {count} lights"),
            Err(err) => log::error!("[poller] Failed to fetch lights: {err}"),
        }
    }
}
