/// Piecewise power-law transfer function, as used by sRGB.
///
/// `transform` takes linear light to display-referred values (encoding),
/// `inverse` goes the other way (decoding).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GammaCorrection {
    gamma: f64,
    transition: f64,
    slope: f64,
    offset: f64,
}

impl GammaCorrection {
    pub const SRGB: Self = Self {
        gamma: 2.4,
        transition: 0.003_130_8,
        slope: 12.92,
        offset: 0.055,
    };

    #[must_use]
    pub fn transform(&self, value: f64) -> f64 {
        if value <= self.transition {
            self.slope * value
        } else {
            (1.0 + self.offset) * value.powf(1.0 / self.gamma) - self.offset
        }
    }

    #[must_use]
    pub fn inverse(&self, value: f64) -> f64 {
        if value <= self.transition * self.slope {
            value / self.slope
        } else {
            ((value + self.offset) / (1.0 + self.offset)).powf(self.gamma)
        }
    }
}
