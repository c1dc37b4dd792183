//! Scrape-time gauge refresh.
//!
//! Nothing runs in the background: every `/metrics` scrape calls
//! [`Aggregator::refresh`], which samples system usage and then, if a store
//! is configured, recomputes the business gauges. Concurrent scrapes race on
//! the gauges and the last writer wins.

pub mod business;
pub mod system;

use std::sync::Arc;

use sinoai_core::AnalyticsError;

use crate::obs::ExporterMetrics;

pub use business::BusinessCollector;
pub use system::SystemSampler;

pub struct Aggregator {
    metrics: Arc<ExporterMetrics>,
    system: SystemSampler,
    business: Option<BusinessCollector>,
}

impl Aggregator {
    pub fn new(metrics: Arc<ExporterMetrics>, business: Option<BusinessCollector>) -> Self {
        Self {
            metrics,
            system: SystemSampler::new(),
            business,
        }
    }

    pub fn business_enabled(&self) -> bool {
        self.business.is_some()
    }

    /// Refresh every gauge. Never fails: business errors are logged and the
    /// affected gauge keeps its previous value.
    pub async fn refresh(&self) {
        self.system.sample(&self.metrics).await;

        let Some(business) = &self.business else {
            return;
        };

        match business.active_users().await {
            Ok(n) => self.metrics.active_users_24h.set(&[], n as f64),
            Err(e) => self.business_failed("active_users_24h", &e),
        }
        match business.ai_messages().await {
            Ok(n) => self.metrics.ai_msgs_per_min.set(&[], n as f64),
            Err(e) => self.business_failed("ai_messages_per_minute", &e),
        }
    }

    fn business_failed(&self, gauge: &str, e: &AnalyticsError) {
        self.metrics
            .business_refresh_failures
            .inc(&[("gauge", gauge)]);
        tracing::warn!(gauge, code = e.code().as_str(), error = %e, "business gauge not refreshed");
    }
}
