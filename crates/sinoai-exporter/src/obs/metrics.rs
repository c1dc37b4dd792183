//! Metrics registry for the exporter.
//!
//! Counter/gauge/histogram types with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors so the same label set always
//! lands on the same series. Histogram buckets are fixed in microseconds and
//! rendered in seconds.

use dashmap::DashMap;
use sinoai_core::label::escape_label_value;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// `name{labels}` or bare `name` when there are no labels.
fn series(name: &str, labels: &str) -> String {
    if labels.is_empty() {
        name.to_string()
    } else {
        format!("{name}{{{labels}}}")
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value; zero for a label set never seen.
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (label_str(r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (labels, val) in rows {
            let _ = writeln!(out, "{} {}", series(name, &labels), val);
        }
    }
}

/// Last-value gauge. `f64` values are stored as raw bits.
#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl GaugeVec {
    /// Overwrite the value.
    pub fn set(&self, labels: &[(&str, &str)], v: f64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0f64.to_bits()));
        gauge.store(v.to_bits(), Ordering::Relaxed);
    }

    /// Current value; zero for a label set never set.
    pub fn get(&self, labels: &[(&str, &str)]) -> f64 {
        self.map
            .get(&label_key(labels))
            .map_or(0.0, |g| f64::from_bits(g.load(Ordering::Relaxed)))
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        let mut rows: Vec<(String, f64)> = self
            .map
            .iter()
            .map(|r| (label_str(r.key()), f64::from_bits(r.value().load(Ordering::Relaxed))))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        if rows.is_empty() {
            // Unlabeled gauges report their default before the first sample.
            let _ = writeln!(out, "{} 0", name);
        }
        for (labels, val) in rows {
            let _ = writeln!(out, "{} {}", series(name, &labels), val);
        }
    }
}

// Fixed buckets in microseconds:
// 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s
const BUCKETS_MICROS: [u64; 11] = [
    5_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000, 2_500_000, 5_000_000,
    10_000_000,
];

fn micros_to_secs(micros: u64) -> f64 {
    micros as f64 / 1_000_000.0
}

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 11],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map.entry(label_key(labels)).or_default();
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations for a label set.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map_or(0, |h| h.count.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        let mut keys: Vec<LabelKey> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();
        for key in keys {
            let Some(hist) = self.map.get(&key) else { continue };
            let labels = label_str(&key);
            let prefix = if labels.is_empty() { String::new() } else { format!("{labels},") };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, micros_to_secs(le), count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = micros_to_secs(hist.sum.load(Ordering::Relaxed));
            let _ = writeln!(out, "{} {}", series(&format!("{name}_sum"), &labels), sum);
            let _ = writeln!(out, "{} {}", series(&format!("{name}_count"), &labels), count);
        }
    }
}

pub const HTTP_REQUESTS: &str = "sinoai_http_requests_total";
pub const HTTP_REQUEST_FAILURES: &str = "sinoai_http_request_failures_total";
pub const HTTP_REQUEST_LATENCY: &str = "sinoai_http_request_latency_seconds";
pub const CPU_USAGE: &str = "sinoai_cpu_usage_percent";
pub const RAM_USAGE: &str = "sinoai_ram_usage_mb";
pub const PROCESS_RESIDENT_MEMORY: &str = "sinoai_process_resident_memory_mb";
pub const ACTIVE_USERS_24H: &str = "sinoai_active_users_24h";
pub const AI_MSGS_PER_MIN: &str = "sinoai_ai_messages_per_minute";
pub const BUSINESS_REFRESH_FAILURES: &str = "sinoai_business_refresh_failures_total";

/// Every instrument the exporter owns. Built once at startup and shared.
#[derive(Default)]
pub struct ExporterMetrics {
    pub http_requests: CounterVec,
    pub http_request_failures: CounterVec,
    pub http_request_latency: HistogramVec,
    pub cpu_usage_percent: GaugeVec,
    pub ram_usage_mb: GaugeVec,
    pub process_resident_mb: GaugeVec,
    pub active_users_24h: GaugeVec,
    pub ai_msgs_per_min: GaugeVec,
    pub business_refresh_failures: CounterVec,
}

impl ExporterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.http_requests.render(HTTP_REQUESTS, &mut out);
        self.http_request_failures.render(HTTP_REQUEST_FAILURES, &mut out);
        self.http_request_latency.render(HTTP_REQUEST_LATENCY, &mut out);
        self.cpu_usage_percent.render(CPU_USAGE, &mut out);
        self.ram_usage_mb.render(RAM_USAGE, &mut out);
        self.process_resident_mb.render(PROCESS_RESIDENT_MEMORY, &mut out);
        self.active_users_24h.render(ACTIVE_USERS_24H, &mut out);
        self.ai_msgs_per_min.render(AI_MSGS_PER_MIN, &mut out);
        self.business_refresh_failures.render(BUSINESS_REFRESH_FAILURES, &mut out);
        out
    }
}
