//! Conversion between the hue bridge color representation (CIE xy chromaticity
//! plus brightness) and 8-bit sRGB.
//!
//! Everything in here is pure: no state, no I/O, safe to call from anywhere.

pub mod gamma;

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::types::XY;

use self::gamma::GammaCorrection;

#[derive(Clone, Debug, PartialEq)]
pub struct Matrix3(pub [f64; 3 * 3]);

impl Matrix3 {
    #[allow(clippy::suboptimal_flops)]
    #[must_use]
    pub fn mult(&self, d: [f64; 3]) -> [f64; 3] {
        let m = self.0;
        let cx = d[0] * m[0] + d[1] * m[1] + d[2] * m[2];
        let cy = d[0] * m[3] + d[1] * m[4] + d[2] * m[5];
        let cz = d[0] * m[6] + d[1] * m[7] + d[2] * m[8];
        [cx, cy, cz]
    }
}

pub struct ColorSpace {
    rgb: Matrix3,
    xyz: Matrix3,
    gamma: GammaCorrection,
}

impl ColorSpace {
    /// XYZ to gamma-encoded rgb. Channels are not clamped, and can be
    /// negative or above 1.0 for out-of-gamut input.
    #[must_use]
    pub fn xyz_to_rgb(&self, x: f64, y: f64, z: f64) -> [f64; 3] {
        self.rgb.mult([x, y, z]).map(|q| self.gamma.transform(q))
    }

    /// `y` must be non-zero
    #[allow(non_snake_case)]
    #[must_use]
    pub fn xyy_to_rgb(&self, x: f64, y: f64, Y: f64) -> [f64; 3] {
        let z = 1.0 - x - y;
        self.xyz_to_rgb((Y / y) * x, Y, (Y / y) * z)
    }

    /// Gamma-encoded rgb (each channel in `[0, 1]`) to XYZ.
    #[must_use]
    pub fn rgb_to_xyz(&self, r: f64, g: f64, b: f64) -> [f64; 3] {
        self.xyz.mult([r, g, b].map(|q| self.gamma.inverse(q)))
    }

    /// Gamma-encoded rgb to chromaticity and luminance.
    ///
    /// Black has no chromaticity, so it maps to the white point of this color
    /// space (with zero luminance).
    #[allow(clippy::many_single_char_names)]
    #[must_use]
    pub fn rgb_to_xyy(&self, r: f64, g: f64, b: f64) -> (XY, f64) {
        let [cx, cy, cz] = self.rgb_to_xyz(r, g, b);
        let sum = cx + cy + cz;

        if sum <= 0.0 {
            return (self.white_point(), 0.0);
        }

        (XY::new(cx / sum, cy / sum), cy)
    }

    #[must_use]
    pub fn white_point(&self) -> XY {
        let [cx, cy, cz] = self.rgb_to_xyz(1.0, 1.0, 1.0);
        let sum = cx + cy + cz;
        XY::new(cx / sum, cy / sum)
    }
}

/// The conversion used by the hue bridge.
///
/// `rgb` is the fixed XYZ to linear rgb matrix the bridge approximates, and
/// `xyz` is its exact inverse (its white point is D65).
pub const HUE: ColorSpace = ColorSpace {
    rgb: Matrix3([
        1.612, -0.203, -0.302, //
        -0.509, 1.412, 0.066, //
        0.026, -0.072, 0.962, //
    ]),
    xyz: Matrix3([
        0.649_841_840_351, 0.103_466_795_157, 0.196_905_849_590, //
        0.234_257_443_687, 0.743_044_431_943, 0.022_562_178_259, //
        -0.000_030_511_334, 0.052_816_073_208, 1.035_867_905_141, //
    ]),
    gamma: GammaCorrection::SRGB,
};

/// Floating point rgb color, each channel in `[0, 255]` when produced by
/// [`xy_bri_to_rgb`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Web color string, `#rrggbb`
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{}{}{}",
            component_to_hex(self.r),
            component_to_hex(self.g),
            component_to_hex(self.b)
        )
    }
}

/// Encode one channel as two lowercase hex digits.
///
/// The value is floored, not rounded, and clamped to `[0, 255]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn component_to_hex(c: f64) -> String {
    let c = c.floor().clamp(0.0, 255.0) as u8;
    format!("{c:02x}")
}

/// 8-bit rgb color, as delivered by a color picker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb8 {
    type Err = ColorError;

    /// Parses `#rrggbb` or `rrggbb`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorError::InvalidHexColor(s.to_string());

        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Convert hue chromaticity and brightness (`0..=255`) to rgb.
///
/// The result is rescaled so the brightest channel is exactly 255. This
/// trades absolute luminance for output that is always displayable (the hue
/// sdk clamps instead).
///
/// Any channel that ends up negative is reported as 255. A zero brightness
/// gives black.
///
/// # Errors
///
/// `y` must be non-zero ([`ColorError::DegenerateChromaticity`]), and all
/// inputs must be finite ([`ColorError::NonFinite`]). Values outside their
/// conventional ranges are not rejected.
#[allow(clippy::float_cmp)]
pub fn xy_bri_to_rgb(x: f64, y: f64, bri: f64) -> Result<Rgb, ColorError> {
    if !(x.is_finite() && y.is_finite() && bri.is_finite()) {
        return Err(ColorError::NonFinite(x, y, bri));
    }

    if y == 0.0 {
        return Err(ColorError::DegenerateChromaticity(x, y));
    }

    let [r, g, b] = HUE.xyy_to_rgb(x, y, bri / 255.0);

    let max = r.max(g).max(b);
    if max == 0.0 {
        return Ok(Rgb::BLACK);
    }

    let [r, g, b] = [r, g, b].map(|c| {
        let c = (c / max) * 255.0;
        if c < 0.0 {
            255.0
        } else {
            c
        }
    });

    /* extreme (but finite) input can still overflow along the way */
    if !(r.is_finite() && g.is_finite() && b.is_finite()) {
        return Err(ColorError::NonFinite(x, y, bri));
    }

    Ok(Rgb::new(r, g, b))
}

/// Convert 8-bit rgb to hue chromaticity, ready for the `xy` field of a light
/// state update.
///
/// Black maps to the white point. No per-model gamut correction is applied.
#[must_use]
pub fn rgb_to_xy(r: u8, g: u8, b: u8) -> XY {
    rgb_to_xy_bri(r, g, b).0
}

/// Like [`rgb_to_xy`], but also returns the brightness (`0..=255` scale) of
/// the color.
///
/// Feeding both back into [`xy_bri_to_rgb`] reproduces the input, as long as
/// the brightest channel is 255 and no channel is 0.
#[must_use]
pub fn rgb_to_xy_bri(r: u8, g: u8, b: u8) -> (XY, f64) {
    let [r, g, b] = [r, g, b].map(|c| f64::from(c) / 255.0);
    let (xy, luminance) = HUE.rgb_to_xyy(r, g, b);
    (xy, luminance * 255.0)
}
