pub mod legacy_api;

/// Highest value of the `hue` field in a v1 light state
pub const MAX_HUE: u16 = 65535;
