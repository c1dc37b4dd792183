#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use sinoai_exporter::obs::{CounterVec, ExporterMetrics, GaugeVec, HistogramVec};

#[test]
fn counter_label_order_does_not_matter() {
    let c = CounterVec::default();
    c.inc(&[("method", "GET"), ("path", "metrics")]);
    c.inc(&[("path", "metrics"), ("method", "GET")]);
    c.add(&[("method", "POST"), ("path", "metrics")], 3);

    assert_eq!(c.get(&[("method", "GET"), ("path", "metrics")]), 2);
    assert_eq!(c.get(&[("method", "POST"), ("path", "metrics")]), 3);
    assert_eq!(c.get(&[("method", "PUT"), ("path", "metrics")]), 0);
}

#[test]
fn gauge_keeps_only_latest_value() {
    let g = GaugeVec::default();
    assert_eq!(g.get(&[]), 0.0);
    g.set(&[], 12.5);
    g.set(&[], 3.25);
    assert_eq!(g.get(&[]), 3.25);
}

#[test]
fn histogram_counts_observations() {
    let h = HistogramVec::default();
    h.observe(&[("path", "healthz")], Duration::from_millis(3));
    h.observe(&[("path", "healthz")], Duration::from_secs(20));
    assert_eq!(h.count(&[("path", "healthz")]), 2);
    assert_eq!(h.count(&[("path", "metrics")]), 0);
}

#[test]
fn renders_exposition_format() {
    let m = ExporterMetrics::new();
    m.http_requests.inc(&[("method", "GET"), ("path", "ui_app.js")]);
    m.http_request_latency
        .observe(&[("path", "ui_app.js")], Duration::from_millis(30));
    m.cpu_usage_percent.set(&[], 41.5);
    m.active_users_24h.set(&[], 7.0);

    let out = m.render();
    assert!(out.contains("# TYPE sinoai_http_requests_total counter\n"));
    assert!(out.contains("sinoai_http_requests_total{method=\"GET\",path=\"ui_app.js\"} 1\n"));

    assert!(out.contains("# TYPE sinoai_http_request_latency_seconds histogram\n"));
    assert!(out.contains("sinoai_http_request_latency_seconds_bucket{path=\"ui_app.js\",le=\"0.025\"} 0\n"));
    assert!(out.contains("sinoai_http_request_latency_seconds_bucket{path=\"ui_app.js\",le=\"0.05\"} 1\n"));
    assert!(out.contains("sinoai_http_request_latency_seconds_bucket{path=\"ui_app.js\",le=\"+Inf\"} 1\n"));
    assert!(out.contains("sinoai_http_request_latency_seconds_sum{path=\"ui_app.js\"} 0.03\n"));
    assert!(out.contains("sinoai_http_request_latency_seconds_count{path=\"ui_app.js\"} 1\n"));

    assert!(out.contains("sinoai_cpu_usage_percent 41.5\n"));
    assert!(out.contains("sinoai_active_users_24h 7\n"));
    // never-set gauges report their default
    assert!(out.contains("sinoai_ai_messages_per_minute 0\n"));
}

#[test]
fn escapes_label_values() {
    let m = ExporterMetrics::new();
    m.http_requests.inc(&[("method", "GET"), ("path", "a\"b")]);
    assert!(m.render().contains("path=\"a\\\"b\""));
}
