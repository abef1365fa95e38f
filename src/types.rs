use serde::{Deserialize, Serialize};

/// CIE 1931 chromaticity point, encoded as `[x, y]` like the hue v1 api does.
#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct XY {
    pub x: f64,
    pub y: f64,
}

impl XY {
    /// D65 white point
    pub const D65: Self = Self::new(0.3127, 0.3290);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for XY {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<XY> for [f64; 2] {
    fn from(value: XY) -> Self {
        [value.x, value.y]
    }
}
