#![deny(missing_docs)]

//! Core library for the Quiver embedding pipeline server.

/// HTTP routing and REST handlers.
pub mod api;
/// ChromaDB vector store integration.
pub mod chroma;
/// Environment-driven configuration management.
pub mod config;
/// Embedding client abstraction and the Workers AI adapter.
pub mod embedding;
/// Result rendering for file exports.
pub mod export;
/// Raw document to normalized text conversion.
pub mod extract;
/// In-memory job registry and the asynchronous processing worker.
pub mod jobs;
/// Structured logging and tracing setup.
pub mod logging;
