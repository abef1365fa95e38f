use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PollingUpdate {
    pub enabled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PollingStatus {
    pub enabled: bool,
    pub updated: Option<DateTime<Utc>>,
}

async fn status(state: &AppState) -> Json<PollingStatus> {
    Json(PollingStatus {
        enabled: state.polling(),
        updated: state.cache.lock().await.updated,
    })
}

async fn get_polling(State(state): State<AppState>) -> Json<PollingStatus> {
    status(&state).await
}

/* The panel pauses polling while the user is interacting with a light, so a
 * poll in flight cannot overwrite the value being edited. */
async fn put_polling(
    State(state): State<AppState>,
    Json(upd): Json<PollingUpdate>,
) -> Json<PollingStatus> {
    log::debug!("Polling {}", if upd.enabled { "resumed" } else { "paused" });
    state.set_polling(upd.enabled);
    status(&state).await
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_polling).put(put_polling))
}
