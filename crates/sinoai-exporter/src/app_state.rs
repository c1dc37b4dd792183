//! Shared application state for the SinoAI exporter.
//!
//! One registry and one aggregator are built at startup and shared by every
//! handler through cheap `Arc` clones. The data store is an optional
//! dependency: without credentials the exporter runs with system gauges only.

use std::sync::Arc;

use sinoai_core::error::Result;

use crate::aggregate::{Aggregator, BusinessCollector};
use crate::config::{ExporterConfig, StoreCredentials};
use crate::obs::ExporterMetrics;
use crate::store::{ActivityStore, RestActivityStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<ExporterMetrics>,
    aggregator: Arc<Aggregator>,
}

struct AppStateInner {
    cfg: ExporterConfig,
}

impl AppState {
    /// Build state with an explicitly injected store (or none).
    pub fn new(cfg: ExporterConfig, store: Option<Arc<dyn ActivityStore>>) -> Self {
        let metrics = Arc::new(ExporterMetrics::new());
        let business = store.map(|s| BusinessCollector::new(s, &cfg.store));
        let aggregator = Arc::new(Aggregator::new(Arc::clone(&metrics), business));

        Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics,
            aggregator,
        }
    }

    /// Build state, wiring the REST store when credentials are available.
    pub fn from_credentials(cfg: ExporterConfig, creds: Option<StoreCredentials>) -> Result<Self> {
        let store = match creds {
            Some(creds) => {
                let rest = RestActivityStore::new(&creds, &cfg.store)?;
                tracing::info!(url = %creds.url, tables = ?cfg.store.tables, "business metrics enabled");
                Some(Arc::new(rest) as Arc<dyn ActivityStore>)
            }
            None => {
                tracing::info!(
                    url_env = %cfg.store.url_env,
                    key_env = %cfg.store.key_env,
                    "store credentials not set; business metrics disabled"
                );
                None
            }
        };
        Ok(Self::new(cfg, store))
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<ExporterMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn aggregator(&self) -> Arc<Aggregator> {
        Arc::clone(&self.aggregator)
    }
}
