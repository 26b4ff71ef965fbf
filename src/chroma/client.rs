//! HTTP client wrapper for the ChromaDB v2 REST API.

use crate::chroma::types::{ChromaError, CollectionPayload, ConnectionParams};
use reqwest::Client;
use serde_json::{Value, json};

/// Lightweight HTTP client scoped to one tenant database and collection.
///
/// Unlike the long-lived embedding client, a `ChromaClient` is constructed per
/// publish request from caller-supplied connection parameters.
pub struct ChromaClient {
    client: Client,
    base_url: String,
    collection_id: String,
}

impl ChromaClient {
    /// Build a client addressing the tenant/database/collection in `params`.
    pub fn new(params: &ConnectionParams) -> Result<Self, ChromaError> {
        let client = Client::builder().user_agent("quiver/0.1").build()?;
        let base_url = format!(
            "http://{}:{}/api/v2/tenants/{}/databases/{}",
            params.host, params.port, params.tenant, params.database
        );
        tracing::debug!(url = %base_url, collection = %params.collection_id, "Initialized Chroma client");

        Ok(Self {
            client,
            base_url,
            collection_id: params.collection_id.clone(),
        })
    }

    /// Probe the tenant database heartbeat endpoint.
    pub async fn heartbeat(&self) -> Result<(), ChromaError> {
        let url = format!("{}/heartbeat", self.base_url);
        let response = self.client.get(url).send().await?;
        self.ensure_success(response, || {
            tracing::debug!("Chroma heartbeat ok");
        })
        .await
    }

    /// Add the payload's records to the collection.
    pub async fn add_records(&self, payload: &CollectionPayload) -> Result<(), ChromaError> {
        self.post_records("add", payload).await
    }

    /// Update existing records in the collection with the payload.
    pub async fn update_records(&self, payload: &CollectionPayload) -> Result<(), ChromaError> {
        self.post_records("update", payload).await
    }

    /// Run a nearest-neighbor query against the collection.
    ///
    /// Chroma's response shape varies with the `include` list, so the body is
    /// relayed as raw JSON rather than forced through a local type.
    pub async fn query_records(
        &self,
        query_embeddings: &[Vec<f64>],
        n_results: usize,
    ) -> Result<Value, ChromaError> {
        let url = format!(
            "{}/collections/{}/query",
            self.base_url, self.collection_id
        );
        let body = json!({
            "include": ["distances", "documents"],
            "n_results": n_results,
            "query_embeddings": query_embeddings,
        });
        tracing::debug!(url = %url, queries = query_embeddings.len(), n_results, "Querying Chroma");

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let error = ChromaError::UnexpectedStatus { status, body };
            tracing::error!(error = %error, "Chroma query failed");
            Err(error)
        }
    }

    async fn post_records(
        &self,
        operation: &str,
        payload: &CollectionPayload,
    ) -> Result<(), ChromaError> {
        let url = format!(
            "{}/collections/{}/{operation}",
            self.base_url, self.collection_id
        );
        tracing::debug!(
            url = %url,
            ids = payload.ids.len(),
            documents = payload.documents.len(),
            embeddings = payload.embeddings.len(),
            metadatas = payload.metadatas.len(),
            "Posting records to Chroma"
        );

        let response = self.client.post(url).json(payload).send().await?;
        let collection = self.collection_id.clone();
        self.ensure_success(response, move || {
            tracing::info!(collection = %collection, operation, "Chroma operation succeeded");
        })
        .await
    }

    async fn ensure_success(
        &self,
        response: reqwest::Response,
        on_success: impl FnOnce(),
    ) -> Result<(), ChromaError> {
        if response.status().is_success() {
            on_success();
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = ChromaError::UnexpectedStatus { status, body };
            tracing::error!(error = %error, "Chroma request failed");
            Err(error)
        }
    }
}
