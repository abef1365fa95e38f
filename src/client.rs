use std::collections::BTreeMap;

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::colorspace::{self, Rgb8};
use crate::error::{ApiError, ApiResult};
use crate::hue::legacy_api::{ApiLight, ApiLightStateUpdate, HueResult};
use crate::hue::MAX_HUE;

/// Client for the v1 REST api of a single hue bridge.
#[derive(Clone, Debug)]
pub struct BridgeClient {
    http: reqwest::Client,
    base: String,
}

/// The bridge reports most failures as `200 OK` with a body of
/// `[{"error": {...}}]`, even where an object is expected.
fn parse_reply<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    if value.is_array() {
        if let Ok(results) = serde_json::from_value::<Vec<HueResult<Value>>>(value.clone()) {
            check_results(&results)?;
        }
    }

    Ok(serde_json::from_value(value)?)
}

fn check_results(results: &[HueResult<Value>]) -> ApiResult<()> {
    if results.is_empty() {
        return Err(ApiError::EmptyBridgeReply);
    }

    for res in results {
        if let HueResult::Error(err) = res {
            return Err(err.clone().into());
        }
    }

    Ok(())
}

/// The bridge reports an unknown light id as error type 3, "resource not
/// available", for reads and writes alike.
fn light_not_found(id: u32) -> impl FnOnce(ApiError) -> ApiError {
    move |err| match err {
        ApiError::Bridge { typ: 3, .. } => ApiError::LightNotFound(id),
        err => err,
    }
}

impl BridgeClient {
    #[must_use]
    pub fn new(url: &str, username: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("{}/api/{username}", url.trim_end_matches('/')),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        log::trace!("GET {url}");

        let value: Value = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_reply(value)
    }

    async fn put<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Vec<HueResult<Value>>> {
        let url = self.url(path);
        log::debug!("PUT {url}: {}", serde_json::to_string(body)?);

        let results: Vec<HueResult<Value>> = self
            .http
            .put(&url)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_results(&results)?;

        Ok(results)
    }

    pub async fn get_lights(&self) -> ApiResult<BTreeMap<u32, ApiLight>> {
        self.get("lights").await
    }

    pub async fn get_light(&self, id: u32) -> ApiResult<ApiLight> {
        self.get(&format!("lights/{id}"))
            .await
            .map_err(light_not_found(id))
    }

    pub async fn set_state(
        &self,
        id: u32,
        upd: &ApiLightStateUpdate,
    ) -> ApiResult<Vec<HueResult<Value>>> {
        self.put(&format!("lights/{id}/state"), upd)
            .await
            .map_err(light_not_found(id))
    }

    pub async fn toggle_light(&self, id: u32, on: bool) -> ApiResult<Vec<HueResult<Value>>> {
        self.set_state(id, &ApiLightStateUpdate::new().with_on(on))
            .await
    }

    pub async fn change_brightness(&self, id: u32, bri: u8) -> ApiResult<Vec<HueResult<Value>>> {
        self.set_state(id, &ApiLightStateUpdate::new().with_brightness(bri))
            .await
    }

    pub async fn set_random_hue(&self, id: u32) -> ApiResult<Vec<HueResult<Value>>> {
        let hue = rand::thread_rng().gen_range(1..=MAX_HUE);
        self.set_state(id, &ApiLightStateUpdate::new().with_hue(hue))
            .await
    }

    pub async fn set_color(&self, id: u32, color: Rgb8) -> ApiResult<Vec<HueResult<Value>>> {
        let xy = colorspace::rgb_to_xy(color.r, color.g, color.b);
        log::debug!("Light {id}: {color} -> [{}, {}]", xy.x, xy.y);
        self.set_state(id, &ApiLightStateUpdate::new().with_color_xy(xy))
            .await
    }
}
