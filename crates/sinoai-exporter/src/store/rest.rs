//! PostgREST-style client (the Supabase REST API).
//!
//! Requests look like
//! `GET {url}/rest/v1/{table}?select=a,b&created_at=gte.{ts}&order=created_at.asc,id.asc&limit=N&offset=M`
//! with the key sent both as `apikey` and as a bearer token. The server caps
//! every response at its own `max-rows`, which may be below `limit`, so a
//! short page says nothing about the end of the result. Pages are fetched
//! until one comes back empty or `max_rows` is reached. The order must be
//! total (hence the tiebreak column) or offsets may skip or repeat rows.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;

use sinoai_core::activity::ActivityRow;
use sinoai_core::error::{AnalyticsError, Result};

use crate::config::{StoreCredentials, StoreSection};
use crate::store::ActivityStore;

pub struct RestActivityStore {
    client: Client,
    base_url: String,
    key: String,
    page_size: usize,
    max_rows: usize,
    order: String,
}

impl std::fmt::Debug for RestActivityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestActivityStore")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("max_rows", &self.max_rows)
            .field("order", &self.order)
            .finish()
    }
}

impl RestActivityStore {
    pub fn new(creds: &StoreCredentials, store: &StoreSection) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = store.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AnalyticsError::Internal(format!("http client build failed: {e}")))?;

        Ok(Self {
            client,
            base_url: creds.url.trim_end_matches('/').to_string(),
            key: creds.key.clone(),
            page_size: store.page_size.max(1),
            max_rows: store.max_rows,
            order: store.order.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn fetch_page(
        &self,
        table: &str,
        select: &str,
        created_after: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ActivityRow>> {
        let resp = self
            .client
            .get(self.table_url(table))
            .query(&[
                ("select", select.to_string()),
                ("created_at", created_after.to_string()),
                ("order", self.order.clone()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ])
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .await
            .map_err(|e| AnalyticsError::StoreUnavailable(format!("{table}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AnalyticsError::StoreResponse(format!("{table}: HTTP {status}")));
        }

        resp.json::<Vec<ActivityRow>>()
            .await
            .map_err(|e| AnalyticsError::StoreResponse(format!("{table}: invalid body: {e}")))
    }
}

#[async_trait]
impl ActivityStore for RestActivityStore {
    async fn rows_since(
        &self,
        table: &str,
        columns: &[&str],
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityRow>> {
        let select = columns.join(",");
        let created_after = format!("gte.{}", since.to_rfc3339_opts(SecondsFormat::Secs, true));

        let mut rows: Vec<ActivityRow> = Vec::new();
        loop {
            let offset = rows.len();
            if offset >= self.max_rows {
                tracing::warn!(
                    table,
                    max_rows = self.max_rows,
                    "store.max_rows reached; further rows are not counted"
                );
                rows.truncate(self.max_rows);
                break;
            }
            let limit = self.page_size.min(self.max_rows - offset);
            let page = self
                .fetch_page(table, &select, &created_after, limit, offset)
                .await?;
            if page.is_empty() {
                break;
            }
            rows.extend(page);
        }

        tracing::debug!(table, rows = rows.len(), "store rows fetched");
        Ok(rows)
    }
}
