//! Axum router wiring.
//!
//! Ops routes are always present. The static UI under `/ui` and the `/`
//! redirect exist only when the configured static directory is on disk.
//! Every route, static files included, runs through the instrumentation
//! middleware.

use axum::{middleware, routing::get, Router};
use tower_http::services::ServeDir;

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz));

    if let Some(dir) = state.cfg().server.existing_static_dir() {
        tracing::info!(dir = %dir.display(), "serving static ui at /ui");
        router = router
            .route("/", get(ops::ui_redirect))
            .nest_service("/ui", ServeDir::new(dir).append_index_html_on_directories(true));
    }

    router
        .layer(middleware::from_fn_with_state(
            state.metrics(),
            transport::track_requests,
        ))
        .with_state(state)
}
