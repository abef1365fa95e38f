use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use camino::Utf8Path;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Base url of the bridge, e.g. `http://192.168.1.43`
    pub url: String,
    pub username: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PanelConfig {
    pub listen_address: Ipv4Addr,
    pub http_port: u16,
    /// Seconds between polls of the light list (at least 1)
    pub poll_interval: u64,
}

impl PanelConfig {
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((self.listen_address, self.http_port))
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(1))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub bridge: BridgeConfig,
    pub panel: PanelConfig,
}

fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("panel.listen_address", "0.0.0.0")?
        .set_default("panel.http_port", 8080)?
        .set_default("panel.poll_interval", 10)
}

pub fn parse(filename: &Utf8Path) -> Result<AppConfig, ConfigError> {
    let settings = builder()?
        .add_source(config::File::with_name(filename.as_str()))
        .build()?;

    settings.try_deserialize()
}
