use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::types::XY;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HueError {
    #[serde(rename = "type")]
    pub typ: u32,
    pub address: String,
    pub description: String,
}

impl From<HueError> for ApiError {
    fn from(err: HueError) -> Self {
        Self::Bridge {
            typ: err.typ,
            address: err.address,
            description: err.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum HueResult<T> {
    Success(T),
    Error(HueError),
}

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LightColorMode {
    Ct,
    Xy,
    Hs,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiEffect {
    None,
    Colorloop,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiAlert {
    None,
    Select,
    LSelect,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiLightState {
    pub on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<ApiEffect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xy: Option<XY>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ct: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<ApiAlert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colormode: Option<LightColorMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default)]
    pub reachable: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiLight {
    pub state: ApiLightState,
    #[serde(rename = "type")]
    pub light_type: String,
    pub name: String,
    pub modelid: String,
    pub manufacturername: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub productname: Option<String>,
    pub uniqueid: String,
    pub swversion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ApiLightStateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xy: Option<XY>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ct: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transitiontime: Option<u16>,
}

impl ApiLightStateUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_on(self, on: bool) -> Self {
        Self {
            on: Some(on),
            ..self
        }
    }

    #[must_use]
    pub fn with_brightness(self, bri: u8) -> Self {
        Self {
            bri: Some(bri),
            ..self
        }
    }

    #[must_use]
    pub fn with_hue(self, hue: u16) -> Self {
        Self {
            hue: Some(hue),
            ..self
        }
    }

    #[must_use]
    pub fn with_color_xy(self, xy: XY) -> Self {
        Self {
            xy: Some(xy),
            ..self
        }
    }
}
