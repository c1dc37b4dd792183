//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness, never touches the registry or the store
//! - `/metrics` : refresh gauges, then Prometheus text format
//! - `/`        : redirect to the static UI (only mounted with a static dir)

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::app_state::AppState;

pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn healthz() -> impl IntoResponse {
    let time = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    (StatusCode::OK, Json(json!({ "ok": true, "time": time })))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    state.aggregator().refresh().await;
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

pub async fn ui_redirect() -> Redirect {
    Redirect::temporary("/ui/")
}
