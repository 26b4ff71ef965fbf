//! HTTP integration with a ChromaDB v2 instance.

mod client;
mod types;

pub use client::ChromaClient;
pub use types::{ChromaError, CollectionPayload, ConnectionParams};
