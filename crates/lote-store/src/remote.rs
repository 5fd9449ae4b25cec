//! Remote persistence over the back-office HTTP API.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use lote_model::{CanonicalRecord, EntityRef, ImportResult};
use lote_resolve::{ReferenceSearch, SearchError};

use crate::error::StoreError;
use crate::repository::{CommitTier, Created, Repository};

/// Client for the persistence API.
///
/// Timeouts are whatever the underlying client carries; the pipeline
/// imposes no per-row deadline of its own.
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn entity_url(&self, endpoint: &str) -> String {
        format!("{}/api/{endpoint}", self.base_url)
    }

    fn batch_url(&self, endpoint: &str) -> String {
        format!("{}/api/{endpoint}/import", self.base_url)
    }

    /// Server-side batch import, for entities whose API supports it.
    ///
    /// The response mirrors the pipeline's own [`ImportResult`].
    pub async fn import_batch(
        &self,
        endpoint: &str,
        records: &[CanonicalRecord],
    ) -> Result<ImportResult, StoreError> {
        let response = self
            .client
            .post(self.batch_url(endpoint))
            .json(&json!({ "records": records }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Repository for RemoteStore {
    async fn create(
        &self,
        endpoint: &str,
        record: &CanonicalRecord,
    ) -> Result<Created, StoreError> {
        let url = self.entity_url(endpoint);
        let response = self.client.post(&url).json(record).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let body: serde_json::Value = response.json().await?;
        let id = body.get("id").and_then(serde_json::Value::as_i64);
        debug!(endpoint, ?id, "record created remotely");
        Ok(Created {
            id,
            tier: CommitTier::Remote,
        })
    }
}

#[async_trait]
impl ReferenceSearch for RemoteStore {
    async fn search(&self, entity: &str, term: &str) -> Result<Vec<EntityRef>, SearchError> {
        let url = self.entity_url(entity);
        let response = self
            .client
            .get(&url)
            .query(&[("search", term)])
            .send()
            .await
            .map_err(|error| SearchError(error.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError(format!("api returned {status}")));
        }
        response
            .json::<Vec<EntityRef>>()
            .await
            .map_err(|error| SearchError(error.to_string()))
    }
}
