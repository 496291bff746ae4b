// src/source.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

/// One outbound query against the data source. Returns the raw JSON array
/// for a feed query; batch order is whatever the source sends back.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<Value>>;
}

/// HTTP-backed source for the KZ global API endpoints.
pub struct HttpRecordSource {
    client: reqwest::Client,
}

impl HttpRecordSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, url: &str) -> Result<Vec<Value>> {
        let records = self
            .client
            .get(url)
            .send()
            .await
            .context("record query request failed")?
            .error_for_status()
            .context("record query returned error status")?
            .json::<Vec<Value>>()
            .await
            .context("record query body was not a JSON array")?;
        Ok(records)
    }
}
