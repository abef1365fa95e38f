use axum::{
    response::{IntoResponse, Response},
    Json, Router,
};
use hyper::StatusCode;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

pub mod lights;
pub mod polling;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_msg = format!("{self}");
        log::error!("Request failed: {error_msg}");
        let res = Json(json!({ "errors": [error_msg] }));

        let status = match self {
            Self::LightNotFound(_) => StatusCode::NOT_FOUND,
            Self::ColorError(_) => StatusCode::BAD_REQUEST,
            Self::Bridge { .. } | Self::EmptyBridgeReply | Self::ReqwestError(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, res).into_response()
    }
}

pub fn router(appstate: AppState) -> Router<()> {
    Router::new()
        .nest("/api/lights", lights::router())
        .nest("/api/polling", polling::router())
        .with_state(appstate)
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use axum::body::{to_bytes, Body};
    use axum::extract::Request;
    use hyper::StatusCode;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::colorspace;
    use crate::config::{AppConfig, BridgeConfig, PanelConfig};
    use crate::state::AppState;
    use crate::testbridge::{color_light, TestBridge};

    fn appstate() -> AppState {
        AppState::from_config(AppConfig {
            /* nothing listens here; these tests must not reach the bridge */
            bridge: BridgeConfig {
                url: "http://127.0.0.1:9".to_string(),
                username: "test".to_string(),
            },
            panel: PanelConfig {
                listen_address: Ipv4Addr::LOCALHOST,
                http_port: 0,
                poll_interval: 10,
            },
        })
    }

    async fn request(
        state: &AppState,
        method: &str,
        uri: &str,
        body: Value,
    ) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let res = super::router(state.clone()).oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn list_cached_lights() {
        let state = appstate();
        let lights = serde_json::from_value(json!({
            "2": {
                "state": {"on": true, "bri": 0, "xy": [0.3, 0.3], "reachable": true},
                "type": "Extended color light",
                "name": "Kitchen",
                "modelid": "LCT015",
                "manufacturername": "Signify Netherlands B.V.",
                "uniqueid": "00:17:88:01:03:aa:bb:cc-0b",
                "swversion": "1.88.1"
            },
            "1": {
                "state": {"on": false, "bri": 254, "reachable": true},
                "type": "Dimmable light",
                "name": "Hallway",
                "modelid": "LWB010",
                "manufacturername": "Signify Netherlands B.V.",
                "uniqueid": "00:17:88:01:02:03:04:05-0b",
                "swversion": "1.90.1"
            }
        }))
        .unwrap();
        state.cache.lock().await.replace(lights);

        let (status, body) = request(&state, "GET", "/api/lights", Value::Null).await;
        assert_eq!(status, StatusCode::OK);

        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["name"], "Hallway");
        assert_eq!(list[0]["hex"], Value::Null);
        assert_eq!(list[1]["id"], 2);
        assert_eq!(list[1]["hex"], "#000000");
    }

    #[tokio::test]
    async fn empty_cache() {
        let state = appstate();
        let (status, body) = request(&state, "GET", "/api/lights", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn pause_polling() {
        let state = appstate();
        assert!(state.polling());

        let (status, body) =
            request(&state, "PUT", "/api/polling", json!({"enabled": false})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["enabled"], false);
        assert!(!state.polling());

        let (_, body) = request(&state, "GET", "/api/polling", Value::Null).await;
        assert_eq!(body, json!({"enabled": false, "updated": null}));
    }

    #[tokio::test]
    async fn bad_color_is_rejected() {
        let state = appstate();
        let (status, body) = request(
            &state,
            "PUT",
            "/api/lights/1/color",
            json!({"color": "#12345z"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0], "Invalid hex color: \"#12345z\"");
    }

    #[tokio::test]
    async fn unknown_light_is_not_found() {
        let (_bridge, state) = TestBridge::start(json!({"1": color_light("Desk", true)})).await;

        let calls = [
            ("GET", "/api/lights/99", Value::Null),
            ("PUT", "/api/lights/99/on", json!({"on": true})),
            ("PUT", "/api/lights/99/brightness", json!({"bri": 10})),
            ("PUT", "/api/lights/99/random", Value::Null),
            ("PUT", "/api/lights/99/color", json!({"color": "#ff0000"})),
        ];

        for (method, uri, body) in calls {
            let (status, body) = request(&state, method, uri, body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(body, json!({"errors": ["Light 99 not found"]}));
        }
    }

    #[tokio::test]
    async fn get_light_refreshes_cache() {
        let (_bridge, state) = TestBridge::start(json!({"5": color_light("Desk", true)})).await;

        let (status, body) = request(&state, "GET", "/api/lights/5", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 5);
        assert_eq!(body["name"], "Desk");

        let cache = state.cache.lock().await;
        assert_eq!(cache.lights[&5].name, "Desk");
    }

    #[tokio::test]
    async fn switch_light_off() {
        let (bridge, state) = TestBridge::start(json!({"5": color_light("Desk", true)})).await;

        let (status, body) =
            request(&state, "PUT", "/api/lights/5/on", json!({"on": false})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["on"], false);

        assert_eq!(bridge.puts(), [(5, json!({"on": false}))]);
        assert!(!state.cache.lock().await.lights[&5].state.on);
    }

    #[tokio::test]
    async fn pick_color() {
        let (bridge, state) = TestBridge::start(json!({"5": color_light("Desk", true)})).await;

        let (status, body) = request(
            &state,
            "PUT",
            "/api/lights/5/color",
            json!({"color": "#00FF00"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let xy = colorspace::rgb_to_xy(0, 255, 0);
        let sent = &bridge.puts()[0].1;
        assert!((sent["xy"][0].as_f64().unwrap() - xy.x).abs() < 1e-12);
        assert!((sent["xy"][1].as_f64().unwrap() - xy.y).abs() < 1e-12);

        let cached = state.cache.lock().await.lights[&5].state.xy.unwrap();
        assert!((cached.x - xy.x).abs() < 1e-12);
        assert!((body["xy"][0].as_f64().unwrap() - xy.x).abs() < 1e-12);
    }
}
