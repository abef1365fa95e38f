use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("Degenerate chromaticity: y must be non-zero (got x={0}, y={1})")]
    DegenerateChromaticity(f64, f64),

    #[error("Non-finite color input: x={0}, y={1}, bri={2}")]
    NonFinite(f64, f64, f64),

    #[error("Invalid hex color: {0:?}")]
    InvalidHexColor(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    /* mapped errors */
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),

    #[error(transparent)]
    SetLoggerError(#[from] log::SetLoggerError),

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    ColorError(#[from] ColorError),

    /* hue bridge errors */
    #[error("Bridge error {typ} at [{address}]: {description}")]
    Bridge {
        typ: u32,
        address: String,
        description: String,
    },

    #[error("Bridge returned an empty reply")]
    EmptyBridgeReply,

    /* panel errors */
    #[error("Light {0} not found")]
    LightNotFound(u32),
}

pub type ApiResult<T> = Result<T, ApiError>;
