//! SinoAI exporter library entry.
//!
//! Wires the metrics registry, request instrumentation, scrape-time
//! aggregation, and the optional activity store into an axum service. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod aggregate;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
pub mod transport;
