//! Router-level behavior of the ops endpoints and the static UI mount.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use chrono::{DateTime, Utc};
use tower::ServiceExt;

use sinoai_exporter::app_state::AppState;
use sinoai_exporter::config::{self, ExporterConfig, StoreCredentials};
use sinoai_exporter::ops::METRICS_CONTENT_TYPE;
use sinoai_exporter::router::build_router;

fn cfg_without_static() -> ExporterConfig {
    let mut cfg = ExporterConfig::default();
    cfg.server.static_dir = None;
    cfg
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(res: Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn healthz_reports_ok_and_current_utc_time() {
    let app = build_router(AppState::new(cfg_without_static(), None));

    let res = app.oneshot(get("/healthz")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let v: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(v["ok"], serde_json::Value::Bool(true));

    let time = v["time"].as_str().expect("time string");
    assert!(time.ends_with('Z'), "{time}");
    let parsed = DateTime::parse_from_rfc3339(time).unwrap().with_timezone(&Utc);
    let drift = (Utc::now() - parsed).num_milliseconds().abs();
    assert!(drift < 5_000, "drift {drift}ms");
}

#[tokio::test]
async fn metrics_serves_exposition_format() {
    let state = AppState::new(cfg_without_static(), None);
    let app = build_router(state.clone());

    let first = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        first.headers().get(header::CONTENT_TYPE).unwrap(),
        METRICS_CONTENT_TYPE
    );
    let body = body_string(first).await;
    assert!(body.contains("# TYPE sinoai_cpu_usage_percent gauge"));
    assert!(body.contains("# TYPE sinoai_ram_usage_mb gauge"));
    assert!(body.contains("sinoai_active_users_24h 0\n"));
    assert!(body.contains("sinoai_ai_messages_per_minute 0\n"));

    // the first scrape was counted once its response was produced
    let second = body_string(app.oneshot(get("/metrics")).await.unwrap()).await;
    assert!(second.contains("sinoai_http_requests_total{method=\"GET\",path=\"metrics\"} 1\n"));
    assert_eq!(
        state.metrics().http_requests.get(&[("method", "GET"), ("path", "metrics")]),
        2
    );
}

#[tokio::test]
async fn metrics_survives_an_unreachable_store() {
    let mut cfg = cfg_without_static();
    cfg.store.timeout_ms = Some(2_000);
    let creds = StoreCredentials::resolve(Some("http://127.0.0.1:9".into()), Some("anon".into()));
    let state = AppState::from_credentials(cfg, creds).unwrap();
    assert!(state.aggregator().business_enabled());

    let metrics = state.metrics();
    metrics.active_users_24h.set(&[], 11.0);
    metrics.ai_msgs_per_min.set(&[], 4.0);

    let res = build_router(state).oneshot(get("/metrics")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_string(res).await;
    assert!(body.contains("sinoai_active_users_24h 11\n"));
    assert!(body.contains("sinoai_ai_messages_per_minute 4\n"));
    assert!(body.contains(
        "sinoai_business_refresh_failures_total{gauge=\"active_users_24h\"} 1\n"
    ));
}

#[tokio::test]
async fn static_ui_and_redirect_when_directory_exists() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>SinoAI Analytics</h1>").unwrap();
    fs::write(dir.path().join("app.js"), "console.log('hi')").unwrap();

    let mut cfg = ExporterConfig::default();
    cfg.server.static_dir = Some(dir.path().to_path_buf());
    let state = AppState::new(cfg, None);
    let app = build_router(state.clone());

    let res = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/ui/");

    let res = app.clone().oneshot(get("/ui/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("SinoAI Analytics"));

    let res = app.oneshot(get("/ui/app.js")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let metrics = state.metrics();
    assert_eq!(metrics.http_requests.get(&[("method", "GET"), ("path", "/")]), 1);
    assert_eq!(metrics.http_requests.get(&[("method", "GET"), ("path", "ui_app.js")]), 1);
}

#[tokio::test]
async fn no_static_routes_without_directory() {
    let mut cfg = ExporterConfig::default();
    cfg.server.static_dir = Some("definitely/not/here".into());
    let app = build_router(AppState::new(cfg, None));

    assert_eq!(app.clone().oneshot(get("/")).await.unwrap().status(), StatusCode::NOT_FOUND);
    assert_eq!(app.clone().oneshot(get("/ui/")).await.unwrap().status(), StatusCode::NOT_FOUND);
    assert_eq!(app.oneshot(get("/healthz")).await.unwrap().status(), StatusCode::OK);
}

#[tokio::test]
async fn healthz_ignores_store_configuration() {
    let cfg = config::load_from_str("version: 1\nserver:\n  static_dir: null\n").unwrap();
    let creds = StoreCredentials::resolve(Some("not a url".into()), Some("anon".into()));
    let app = build_router(AppState::from_credentials(cfg, creds).unwrap());

    let res = app.oneshot(get("/healthz")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
