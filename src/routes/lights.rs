use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use crate::colorspace::Rgb8;
use crate::error::ApiResult;
use crate::panel::LightView;
use crate::state::AppState;

type LightResult = ApiResult<Json<LightView>>;

#[derive(Debug, Deserialize)]
pub struct OnUpdate {
    pub on: bool,
}

#[derive(Debug, Deserialize)]
pub struct BrightnessUpdate {
    pub bri: u8,
}

#[derive(Debug, Deserialize)]
pub struct ColorUpdate {
    pub color: String,
}

/// Fetch a single light from the bridge, and store it in the cache.
async fn refresh(state: &AppState, id: u32) -> LightResult {
    let light = state.client().get_light(id).await?;

    let view = LightView::from_light(id, &light);
    state.cache.lock().await.update(id, light);

    Ok(Json(view))
}

async fn get_lights(State(state): State<AppState>) -> Json<Vec<LightView>> {
    let lock = state.cache.lock().await;

    Json(
        lock.lights
            .iter()
            .map(|(id, light)| LightView::from_light(*id, light))
            .collect(),
    )
}

async fn get_light(State(state): State<AppState>, Path(id): Path<u32>) -> LightResult {
    refresh(&state, id).await
}

async fn put_light_on(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(upd): Json<OnUpdate>,
) -> LightResult {
    log::info!("Light {id}: switching {}", if upd.on { "on" } else { "off" });
    state.client().toggle_light(id, upd.on).await?;
    refresh(&state, id).await
}

async fn put_light_brightness(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(upd): Json<BrightnessUpdate>,
) -> LightResult {
    log::info!("Light {id}: brightness {}", upd.bri);
    state.client().change_brightness(id, upd.bri).await?;
    refresh(&state, id).await
}

async fn put_light_random(State(state): State<AppState>, Path(id): Path<u32>) -> LightResult {
    log::info!("Light {id}: random hue");
    state.client().set_random_hue(id).await?;
    refresh(&state, id).await
}

async fn put_light_color(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(upd): Json<ColorUpdate>,
) -> LightResult {
    let color: Rgb8 = upd.color.parse()?;
    log::info!("Light {id}: color {color}");
    state.client().set_color(id, color).await?;
    refresh(&state, id).await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_lights))
        .route("/:id", get(get_light))
        .route("/:id/on", put(put_light_on))
        .route("/:id/brightness", put(put_light_brightness))
        .route("/:id/random", put(put_light_random))
        .route("/:id/color", put(put_light_color))
}
