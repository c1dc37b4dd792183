//! Exporter config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use sinoai_core::error::{AnalyticsError, Result};

pub use schema::{ExporterConfig, ServerSection, StoreCredentials, StoreSection};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sinoai.yaml";

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| AnalyticsError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| AnalyticsError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the explicit path if given, else `sinoai.yaml` if present, else defaults.
pub fn load(path: Option<&str>) -> Result<ExporterConfig> {
    match path {
        Some(p) => load_from_file(p),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => load_from_file(DEFAULT_CONFIG_FILE),
        None => Ok(ExporterConfig::default()),
    }
}
