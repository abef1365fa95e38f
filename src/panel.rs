use serde::{Deserialize, Serialize};

use crate::colorspace::{self, Rgb};
use crate::hue::legacy_api::ApiLight;
use crate::types::XY;

/// What the panel shows for a single light: its state, and the color swatch
/// computed from it.
///
/// `color` is the color the light is set to, even while it is switched off.
/// `hex` is the card background, and is only present while the light is on.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LightView {
    pub id: u32,
    pub name: String,
    pub modelid: String,
    pub on: bool,
    pub reachable: bool,
    pub bri: Option<u8>,
    pub xy: Option<XY>,
    pub color: Option<Rgb>,
    pub hex: Option<String>,
}

impl LightView {
    #[must_use]
    pub fn from_light(id: u32, light: &ApiLight) -> Self {
        let state = &light.state;

        let color = state.xy.and_then(|xy| {
            let bri = f64::from(state.bri.unwrap_or(u8::MAX));
            colorspace::xy_bri_to_rgb(xy.x, xy.y, bri)
                .map_err(|err| log::warn!("Light {id} [{}]: {err}", light.name))
                .ok()
        });

        Self {
            id,
            name: light.name.clone(),
            modelid: light.modelid.clone(),
            on: state.on,
            reachable: state.reachable,
            bri: state.bri,
            xy: state.xy,
            color,
            hex: color.filter(|_| state.on).map(|rgb| rgb.to_hex()),
        }
    }
}
