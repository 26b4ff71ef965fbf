//! Shared types used by the Chroma client.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors returned while interacting with Chroma.
#[derive(Debug, Error)]
pub enum ChromaError {
    /// HTTP layer failed before receiving a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Chroma responded with an unexpected status code.
    #[error("Unexpected Chroma response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned from Chroma.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
}

impl ChromaError {
    /// HTTP status to relay to our own caller for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::UnexpectedStatus { status, .. } => *status,
        }
    }
}

/// Connection coordinates for a Chroma tenant database and collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Hostname of the Chroma instance.
    pub host: String,
    /// Port of the Chroma HTTP API.
    pub port: u16,
    /// Tenant name.
    pub tenant: String,
    /// Database name within the tenant.
    pub database: String,
    /// Target collection identifier.
    pub collection_id: String,
}

/// Record payload for collection add/update calls.
///
/// Callers supply metadata; ids, documents, and embeddings are injected from
/// the job result before the request goes out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionPayload {
    /// Record identifiers (filenames from the job).
    #[serde(default)]
    pub ids: Vec<String>,
    /// Source documents stored beside the vectors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<String>,
    /// Embedding vectors, one per id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeddings: Vec<Vec<f64>>,
    /// Optional per-record metadata maps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadatas: Vec<Map<String, Value>>,
    /// Optional per-record source URIs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uris: Vec<String>,
}
