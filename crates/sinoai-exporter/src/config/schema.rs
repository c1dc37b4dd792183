use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use sinoai_core::error::{AnalyticsError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            store: StoreSection::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AnalyticsError::UnsupportedVersion);
        }
        self.server.validate()?;
        self.store.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Directory served under `/ui`. Ignored when it does not exist.
    #[serde(default = "default_static_dir")]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.trim().is_empty() {
            return Err(AnalyticsError::BadRequest("server.listen must not be empty".into()));
        }
        Ok(())
    }

    /// The static directory, only when it exists on disk.
    pub fn existing_static_dir(&self) -> Option<&PathBuf> {
        self.static_dir.as_ref().filter(|d| d.is_dir())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_static_dir() -> Option<PathBuf> {
    Some(PathBuf::from("public"))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default = "default_url_env")]
    pub url_env: String,

    #[serde(default = "default_key_env")]
    pub key_env: String,

    #[serde(default = "default_tables")]
    pub tables: Vec<String>,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// PostgREST `order` for paging; must end in a unique column.
    #[serde(default = "default_order")]
    pub order: String,

    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default = "default_active_window_secs")]
    pub active_window_secs: u64,

    #[serde(default = "default_rate_window_secs")]
    pub rate_window_secs: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            url_env: default_url_env(),
            key_env: default_key_env(),
            tables: default_tables(),
            page_size: default_page_size(),
            max_rows: default_max_rows(),
            order: default_order(),
            timeout_ms: None,
            active_window_secs: default_active_window_secs(),
            rate_window_secs: default_rate_window_secs(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.tables.is_empty() || self.tables.iter().any(|t| t.trim().is_empty()) {
            return Err(AnalyticsError::BadRequest(
                "store.tables must list at least one non-empty table".into(),
            ));
        }
        if !(1..=10000).contains(&self.page_size) {
            return Err(AnalyticsError::BadRequest(
                "store.page_size must be between 1 and 10000".into(),
            ));
        }
        if self.max_rows < self.page_size {
            return Err(AnalyticsError::BadRequest(
                "store.max_rows must be at least page_size".into(),
            ));
        }
        if self.order.trim().is_empty() {
            return Err(AnalyticsError::BadRequest("store.order must not be empty".into()));
        }
        if self.active_window_secs == 0 || self.rate_window_secs == 0 {
            return Err(AnalyticsError::BadRequest(
                "store windows must be greater than zero".into(),
            ));
        }
        if self.timeout_ms == Some(0) {
            return Err(AnalyticsError::BadRequest(
                "store.timeout_ms must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn active_window(&self) -> Duration {
        Duration::from_secs(self.active_window_secs)
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window_secs)
    }
}

fn default_url_env() -> String {
    "SUPABASE_URL".into()
}
fn default_key_env() -> String {
    "SUPABASE_ANON_KEY".into()
}
fn default_tables() -> Vec<String> {
    vec!["aisum_app".into(), "aisum_tgbot".into()]
}
fn default_page_size() -> usize {
    1000
}
fn default_max_rows() -> usize {
    200_000
}
fn default_order() -> String {
    "created_at.asc,id.asc".into()
}
fn default_active_window_secs() -> u64 {
    24 * 60 * 60
}
fn default_rate_window_secs() -> u64 {
    60
}

/// Endpoint and read-only key for the data store.
#[derive(Clone)]
pub struct StoreCredentials {
    pub url: String,
    pub key: String,
}

impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl StoreCredentials {
    /// Both values must be present and non-blank, otherwise collection is off.
    pub fn resolve(url: Option<String>, key: Option<String>) -> Option<Self> {
        let url = url.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
        let key = key.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
        Some(Self { url, key })
    }

    pub fn from_env(store: &StoreSection) -> Option<Self> {
        Self::resolve(
            std::env::var(&store.url_env).ok(),
            std::env::var(&store.key_env).ok(),
        )
    }
}
