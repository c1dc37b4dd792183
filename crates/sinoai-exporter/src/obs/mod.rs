//! Lightweight in-process metrics.
//!
//! Instruments are stored as atomics behind `DashMap` shards and rendered by
//! the `/metrics` handler in the Prometheus text format.

pub mod metrics;

pub use metrics::{CounterVec, ExporterMetrics, GaugeVec, HistogramVec};
