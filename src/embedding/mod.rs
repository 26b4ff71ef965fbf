//! Embedding provider abstraction and the Cloudflare Workers AI adapter.

use crate::config::get_config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by embedding providers.
#[derive(Debug, Error)]
pub enum EmbeddingClientError {
    /// No text was supplied to embed.
    #[error("no texts provided")]
    EmptyInput,
    /// HTTP layer failed before a response arrived (includes timeouts).
    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Provider answered with a non-success status.
    #[error("embedding provider returned {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status returned by the provider.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
    /// Provider returned a vector count that does not match the input count.
    #[error("embedding provider returned {actual} vectors for {expected} inputs")]
    CountMismatch {
        /// Number of texts sent to the provider.
        expected: usize,
        /// Number of vectors received back.
        actual: usize,
    },
}

/// Interface implemented by embedding backends.
#[async_trait]
pub trait EmbeddingClient {
    /// Produce one embedding vector per supplied text, in input order.
    async fn generate_embeddings(
        &self,
        texts: Vec<String>,
    ) -> Result<Vec<Vec<f64>>, EmbeddingClientError>;
}

/// Request body for the Workers AI BGE models.
#[derive(Debug, Serialize)]
struct BatchRequest {
    text: Vec<String>,
}

/// Envelope the Workers AI REST API wraps results in.
#[derive(Debug, Deserialize)]
struct BatchResponse {
    result: BatchResult,
}

#[derive(Debug, Deserialize)]
struct BatchResult {
    data: Vec<Vec<f64>>,
}

/// Batched embedding client for the Cloudflare Workers AI REST API.
pub struct WorkersAiClient {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl WorkersAiClient {
    /// Construct a client from the process configuration.
    ///
    /// `EMBEDDING_API_URL` overrides the endpoint wholesale; otherwise it is
    /// derived from the account id and model name. The provider call carries a
    /// client-level deadline so a hung upstream surfaces as a failed job
    /// instead of a worker that never finishes.
    pub fn from_config() -> Result<Self, EmbeddingClientError> {
        let config = get_config();
        let endpoint = config.embedding_api_url.clone().unwrap_or_else(|| {
            format!(
                "https://api.cloudflare.com/client/v4/accounts/{}/ai/run/{}",
                config.cloudflare_account_id, config.embedding_model
            )
        });
        let client = Client::builder()
            .user_agent("quiver/0.1")
            .timeout(Duration::from_secs(config.embedding_timeout_secs))
            .build()?;

        tracing::debug!(endpoint = %endpoint, timeout_secs = config.embedding_timeout_secs, "Initialized embedding client");

        Ok(Self {
            client,
            endpoint,
            api_token: config.cloudflare_api_token.clone(),
        })
    }
}

#[async_trait]
impl EmbeddingClient for WorkersAiClient {
    async fn generate_embeddings(
        &self,
        texts: Vec<String>,
    ) -> Result<Vec<Vec<f64>>, EmbeddingClientError> {
        if texts.is_empty() {
            return Err(EmbeddingClientError::EmptyInput);
        }
        let expected = texts.len();

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&BatchRequest { text: texts })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingClientError::UnexpectedStatus { status, body });
        }

        let payload: BatchResponse = response.json().await?;
        let vectors = payload.result.data;
        if vectors.len() != expected {
            return Err(EmbeddingClientError::CountMismatch {
                expected,
                actual: vectors.len(),
            });
        }

        tracing::debug!(
            vectors = vectors.len(),
            dimension = vectors.first().map_or(0, Vec::len),
            "Received embeddings"
        );
        Ok(vectors)
    }
}
