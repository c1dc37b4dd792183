//! Business gauges computed from the activity tables.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;

use sinoai_core::activity::{
    count_ai_messages, count_distinct_chats, ActivityRow, ACTIVE_USER_COLUMNS, AI_MESSAGE_COLUMNS,
};
use sinoai_core::error::{AnalyticsError, Result};

use crate::config::StoreSection;
use crate::store::ActivityStore;

pub struct BusinessCollector {
    store: Arc<dyn ActivityStore>,
    tables: Vec<String>,
    active_window: Duration,
    rate_window: Duration,
}

impl BusinessCollector {
    pub fn new(store: Arc<dyn ActivityStore>, cfg: &StoreSection) -> Self {
        Self {
            store,
            tables: cfg.tables.clone(),
            active_window: cfg.active_window(),
            rate_window: cfg.rate_window(),
        }
    }

    /// Distinct chats seen in any table within the active window.
    pub async fn active_users(&self) -> Result<usize> {
        self.active_users_at(Utc::now()).await
    }

    /// Rows with a non-empty AI message within the rate window.
    pub async fn ai_messages(&self) -> Result<usize> {
        self.ai_messages_at(Utc::now()).await
    }

    pub async fn active_users_at(&self, now: DateTime<Utc>) -> Result<usize> {
        let rows = self
            .rows_in_window(ACTIVE_USER_COLUMNS, now, self.active_window)
            .await?;
        Ok(count_distinct_chats(&rows))
    }

    pub async fn ai_messages_at(&self, now: DateTime<Utc>) -> Result<usize> {
        let rows = self
            .rows_in_window(AI_MESSAGE_COLUMNS, now, self.rate_window)
            .await?;
        Ok(count_ai_messages(&rows))
    }

    async fn rows_in_window(
        &self,
        columns: &[&str],
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<Vec<ActivityRow>> {
        let window = chrono::Duration::from_std(window)
            .map_err(|e| AnalyticsError::Internal(format!("window out of range: {e}")))?;
        let since = now - window;

        let per_table = try_join_all(
            self.tables
                .iter()
                .map(|table| self.store.rows_since(table, columns, since)),
        )
        .await?;
        Ok(per_table.into_iter().flatten().collect())
    }
}
