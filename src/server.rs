use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Request;
use axum::response::Response;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing::{field, info_span, Span};

use crate::error::ApiResult;
use crate::routes;
use crate::state::AppState;

pub type PanelService = IntoMakeService<NormalizePath<Router>>;

fn record_response(response: &Response<Body>, latency: Duration, span: &Span) {
    span.record("status", field::display(response.status()));
    span.record("latency", field::display(format!("{}ms", latency.as_millis())));
}

/// The panel api, with a span per request and trailing slashes ignored.
#[must_use]
pub fn build_service(appstate: AppState) -> PanelService {
    let traced = routes::router(appstate).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request| {
                info_span!(
                    "panel",
                    method = %request.method(),
                    uri = %request.uri(),
                    status = field::Empty,
                    latency = field::Empty,
                )
            })
            .on_response(record_response),
    );

    ServiceExt::<Request>::into_make_service(
        NormalizePathLayer::trim_trailing_slash().layer(traced),
    )
}

pub async fn http_server(addr: SocketAddr, svc: PanelService) -> ApiResult<()> {
    log::info!("Panel listening on http://{addr}");

    axum_server::bind(addr).serve(svc).await?;

    Ok(())
}
