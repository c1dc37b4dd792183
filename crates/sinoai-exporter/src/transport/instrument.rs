//! Request instrumentation middleware.
//!
//! Timing policy:
//! - Every request is timed. The observation is taken when the request guard
//!   drops, so it also happens when the inner service panics or the
//!   connection goes away mid-request.
//! - `sinoai_http_requests_total{method,path}` increments only once the inner
//!   service produced a response.
//! - A request that never produced a response counts toward
//!   `sinoai_http_request_failures_total{path}` instead.
//!
//! Errors and panics pass through untouched.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sinoai_core::label::normalize_path;

use crate::obs::ExporterMetrics;

pub async fn track_requests(
    State(metrics): State<Arc<ExporterMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().as_str().to_owned();
    let mut timer = RequestTimer::start(metrics, normalize_path(req.uri().path()));

    let response = next.run(req).await;

    timer.responded(&method);
    tracing::debug!(
        method = %method,
        path = %timer.path,
        status = response.status().as_u16(),
        "request handled"
    );
    response
}

/// Records the latency of one request cycle when dropped.
struct RequestTimer {
    metrics: Arc<ExporterMetrics>,
    path: String,
    started: Instant,
    responded: bool,
}

impl RequestTimer {
    fn start(metrics: Arc<ExporterMetrics>, path: String) -> Self {
        Self {
            metrics,
            path,
            started: Instant::now(),
            responded: false,
        }
    }

    fn responded(&mut self, method: &str) {
        self.responded = true;
        self.metrics
            .http_requests
            .inc(&[("method", method), ("path", &self.path)]);
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        let path = [("path", self.path.as_str())];
        self.metrics
            .http_request_latency
            .observe(&path, self.started.elapsed());
        if !self.responded {
            self.metrics.http_request_failures.inc(&path);
            tracing::warn!(path = %self.path, "request ended without a response");
        }
    }
}
