//! Read-only access to the activity data store.
//!
//! The exporter only ever needs "rows of table X created since T". The store
//! is optional: when no credentials are configured the aggregator simply has
//! none and the business gauges keep their defaults.

pub mod memory;
pub mod rest;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use sinoai_core::activity::ActivityRow;
use sinoai_core::error::Result;

pub use memory::InMemoryActivityStore;
pub use rest::RestActivityStore;

#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Rows of `table` with `created_at >= since`, limited to `columns`.
    async fn rows_since(
        &self,
        table: &str,
        columns: &[&str],
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityRow>>;
}
