//! In-process stand-in for a hue bridge, serving the v1 light endpoints on an
//! ephemeral localhost port. Used by the tests of everything that talks to a
//! bridge.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

use crate::config::{AppConfig, BridgeConfig, PanelConfig};
use crate::state::AppState;

#[derive(Default)]
struct Inner {
    lights: Map<String, Value>,
    puts: Vec<(u32, Value)>,
    fetches: usize,
}

#[derive(Clone, Default)]
pub struct TestBridge {
    inner: Arc<Mutex<Inner>>,
}

fn not_available(id: u32) -> Value {
    json!([{
        "error": {
            "type": 3,
            "address": format!("/lights/{id}"),
            "description": format!("resource, /lights/{id}, not available"),
        }
    }])
}

async fn get_lights(State(bridge): State<TestBridge>) -> Json<Value> {
    let mut inner = bridge.inner.lock().unwrap();
    inner.fetches += 1;
    Json(Value::Object(inner.lights.clone()))
}

async fn get_light(
    State(bridge): State<TestBridge>,
    Path((_user, id)): Path<(String, u32)>,
) -> Json<Value> {
    let inner = bridge.inner.lock().unwrap();
    Json(
        inner
            .lights
            .get(&id.to_string())
            .cloned()
            .unwrap_or_else(|| not_available(id)),
    )
}

async fn put_light_state(
    State(bridge): State<TestBridge>,
    Path((_user, id)): Path<(String, u32)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut inner = bridge.inner.lock().unwrap();
    inner.puts.push((id, body.clone()));

    let Some(light) = inner.lights.get_mut(&id.to_string()) else {
        return Json(not_available(id));
    };

    let mut results = vec![];
    for (key, value) in body.as_object().into_iter().flatten() {
        light["state"][key] = value.clone();

        let mut success = Map::new();
        success.insert(format!("/lights/{id}/state/{key}"), value.clone());
        results.push(json!({ "success": success }));
    }

    Json(Value::Array(results))
}

impl TestBridge {
    /// Start serving `lights` (a v1 id -> light map), and return the bridge
    /// together with an [`AppState`] pointing at it.
    pub async fn start(lights: Value) -> (Self, AppState) {
        let bridge = Self::default();
        if let Value::Object(lights) = lights {
            bridge.inner.lock().unwrap().lights = lights;
        }

        let app = Router::new()
            .route("/api/:user/lights", get(get_lights))
            .route("/api/:user/lights/:id", get(get_light))
            .route("/api/:user/lights/:id/state", put(put_light_state))
            .with_state(bridge.clone());

        let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        let state = AppState::from_config(AppConfig {
            bridge: BridgeConfig {
                url: format!("http://{addr}"),
                username: "test".to_string(),
            },
            panel: PanelConfig {
                listen_address: Ipv4Addr::LOCALHOST,
                http_port: 0,
                poll_interval: 1,
            },
        });

        (bridge, state)
    }

    /// Bodies of all state updates received so far, with their light id.
    pub fn puts(&self) -> Vec<(u32, Value)> {
        self.inner.lock().unwrap().puts.clone()
    }

    /// Number of full light list fetches served.
    pub fn fetches(&self) -> usize {
        self.inner.lock().unwrap().fetches
    }
}

/// A color bulb record, as the bridge reports it.
pub fn color_light(name: &str, on: bool) -> Value {
    json!({
        "state": {
            "on": on,
            "bri": 254,
            "hue": 8402,
            "sat": 140,
            "effect": "none",
            "xy": [0.4573, 0.41],
            "ct": 366,
            "alert": "select",
            "colormode": "xy",
            "mode": "homeautomation",
            "reachable": true
        },
        "type": "Extended color light",
        "name": name,
        "modelid": "LCT015",
        "manufacturername": "Signify Netherlands B.V.",
        "productname": "Hue color lamp",
        "uniqueid": "00:17:88:01:03:aa:bb:cc-0b",
        "swversion": "1.88.1"
    })
}
