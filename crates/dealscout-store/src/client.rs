//! Firestore REST client for the batch upsert.

use std::time::Duration;

use serde_json::json;

use dealscout_core::DealRecord;

use crate::auth::fetch_access_token;
use crate::credentials::ServiceAccountKey;
use crate::encode::record_fields;
use crate::error::StoreError;

/// Client for Firestore's `documents:commit` endpoint.
///
/// One call to [`FirestoreClient::commit`] performs one atomic batch upsert
/// keyed by each record's `id`. The base URL is configurable so the emulator
/// (or a mock server in tests) can stand in for the live service.
pub struct FirestoreClient {
    http: reqwest::Client,
    key: ServiceAccountKey,
    collection: String,
    base_url: String,
}

impl FirestoreClient {
    /// Creates a client writing to `collection` in the key's project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        key: ServiceAccountKey,
        collection: &str,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            key,
            collection: collection.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Upserts the records as one atomic batch, keyed by `id`.
    ///
    /// An empty slice performs no network operation and reports zero records
    /// written. Each write is an unconditional `update` (no precondition), so
    /// an existing document with the same id is replaced rather than
    /// duplicated. There is no partial-batch retry: any failure is a failure
    /// of the whole batch.
    ///
    /// # Errors
    ///
    /// - Any token-flow error from the auth module.
    /// - [`StoreError::Http`] — transport failure.
    /// - [`StoreError::UnexpectedStatus`] — non-2xx commit response.
    pub async fn commit(&self, records: &[DealRecord]) -> Result<usize, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let token = fetch_access_token(&self.http, &self.key).await?;

        let document_root = format!(
            "projects/{}/databases/(default)/documents",
            self.key.project_id
        );
        let writes: Vec<serde_json::Value> = records
            .iter()
            .map(|record| {
                json!({
                    "update": {
                        "name": format!("{document_root}/{}/{}", self.collection, record.id),
                        "fields": record_fields(record),
                    }
                })
            })
            .collect();

        let url = format!("{}/v1/{document_root}:commit", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "writes": writes }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        tracing::info!(
            records = records.len(),
            collection = %self.collection,
            "batch upsert committed"
        );
        Ok(records.len())
    }
}
