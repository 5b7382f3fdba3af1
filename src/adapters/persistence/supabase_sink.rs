//! Supabase adapter. Implements ResponseSink by inserting rows via the PostgREST API.

use crate::domain::{DomainError, ResponseRecord};
use crate::ports::ResponseSink;
use reqwest::Client;
use tracing::info;

/// Inserts each record as one row of `table`. The record's flat JSON shape
/// (`timestamp`, `id`, `q1`..) must match the table's columns.
pub struct SupabaseSink {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseSink {
    /// # Arguments
    /// * `base_url` - Project URL, e.g. "https://xyz.supabase.co"
    /// * `api_key` - anon or service key
    /// * `table` - target table (the survey uses "survey")
    pub fn new(base_url: String, api_key: String, table: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            table,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }
}

#[async_trait::async_trait]
impl ResponseSink for SupabaseSink {
    async fn insert(&self, record: &ResponseRecord) -> Result<(), DomainError> {
        let url = self.endpoint();
        let res = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| DomainError::Repo(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Repo(format!(
                "Supabase insert error {}: {}",
                status, text
            )));
        }

        info!(table = %self.table, user = %record.id, "response recorded in Supabase");
        Ok(())
    }
}
