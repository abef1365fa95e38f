use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::client::BridgeClient;
use crate::config::AppConfig;
use crate::hue::legacy_api::ApiLight;

/// Last known state of all lights on the bridge.
#[derive(Debug, Default)]
pub struct LightCache {
    pub lights: BTreeMap<u32, ApiLight>,
    pub updated: Option<DateTime<Utc>>,
}

impl LightCache {
    pub fn replace(&mut self, lights: BTreeMap<u32, ApiLight>) {
        self.lights = lights;
        self.updated = Some(Utc::now());
    }

    pub fn update(&mut self, id: u32, light: ApiLight) {
        self.lights.insert(id, light);
    }
}

#[derive(Clone)]
pub struct AppState {
    conf: Arc<AppConfig>,
    client: BridgeClient,
    polling: Arc<AtomicBool>,
    pub cache: Arc<Mutex<LightCache>>,
}

impl AppState {
    #[must_use]
    pub fn from_config(config: AppConfig) -> Self {
        let client = BridgeClient::new(&config.bridge.url, &config.bridge.username);
        log::debug!("Using bridge at [{}]", config.bridge.url);

        Self {
            conf: Arc::new(config),
            client,
            polling: Arc::new(AtomicBool::new(true)),
            cache: Arc::new(Mutex::new(LightCache::default())),
        }
    }

    #[must_use]
    pub fn config(&self) -> Arc<AppConfig> {
        self.conf.clone()
    }

    #[must_use]
    pub const fn client(&self) -> &BridgeClient {
        &self.client
    }

    #[must_use]
    pub fn polling(&self) -> bool {
        self.polling.load(Ordering::Relaxed)
    }

    pub fn set_polling(&self, enabled: bool) {
        self.polling.store(enabled, Ordering::Relaxed);
    }
}
