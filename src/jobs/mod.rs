//! Job orchestration: the shared registry plus the detached processing worker.
//!
//! A submission creates one registry entry in the `processing` state and spawns one
//! worker task. The worker is the only writer that ever touches the entry again; it
//! transitions the job to `completed` (attaching the result in the same critical
//! section) or `failed` exactly once. Queries only ever read. Nothing survives a
//! process restart.

mod registry;
mod stopwords;
/// Detached per-job processing task.
pub mod worker;

pub use registry::{JobEntry, JobRegistry, JobResult, JobState, JobStatus, RegistryError};
pub use stopwords::clean_text;

/// How far in the future the completion hint handed to callers points.
pub const ETA_HORIZON: std::time::Duration = std::time::Duration::from_secs(5);

/// One uploaded file after text extraction, owned by its job's worker.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Client-supplied filename, used as the stable per-file identifier.
    pub name: String,
    /// Normalized text produced by the extractor.
    pub text: String,
}
