//! In-process activity store backed by `DashMap`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};

use sinoai_core::activity::ActivityRow;
use sinoai_core::error::{AnalyticsError, Result};

use crate::store::ActivityStore;

/// In-process store for local runs and tests.
///
/// Rows without a parseable `created_at` are never returned. Tables marked
/// with [`InMemoryActivityStore::fail_table`] answer with `StoreUnavailable`.
#[derive(Default)]
pub struct InMemoryActivityStore {
    tables: DashMap<String, Vec<ActivityRow>>,
    failing: DashSet<String>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, table: impl Into<String>, row: ActivityRow) {
        self.tables.entry(table.into()).or_default().push(row);
    }

    pub fn fail_table(&self, table: impl Into<String>) {
        self.failing.insert(table.into());
    }

    pub fn heal_table(&self, table: &str) {
        self.failing.remove(table);
    }
}

fn created_at(row: &ActivityRow) -> Option<DateTime<Utc>> {
    let raw = row.created_at.as_deref()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[async_trait]
impl ActivityStore for InMemoryActivityStore {
    async fn rows_since(
        &self,
        table: &str,
        _columns: &[&str],
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityRow>> {
        if self.failing.contains(table) {
            return Err(AnalyticsError::StoreUnavailable(format!("{table}: marked failing")));
        }
        Ok(self
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| created_at(r).is_some_and(|t| t >= since))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
