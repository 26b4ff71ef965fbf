//! Process-local store for job lifecycle state and results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;
use thiserror::Error;

/// Errors raised by registry mutations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A job with the given identifier already exists.
    #[error("job '{0}' already registered")]
    DuplicateJob(String),
    /// No job with the given identifier exists.
    #[error("job '{0}' not found")]
    UnknownJob(String),
}

/// Lifecycle state of one submitted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Worker has been launched and has not reported back yet.
    Processing,
    /// Worker finished and a result is available.
    Completed,
    /// Worker reported a failure; no result exists.
    Failed,
}

/// Mutable status record for one job.
#[derive(Debug, Clone)]
pub struct JobStatus {
    /// Current lifecycle state.
    pub state: JobState,
    /// Completion hint handed out at submission; a hint, not an SLA.
    pub deadline: Instant,
    /// Human-readable failure message, present only in the `Failed` state.
    pub error: Option<String>,
}

impl JobStatus {
    /// Seconds until the completion hint elapses, clamped to zero once past due.
    pub fn eta_seconds(&self) -> u64 {
        self.deadline
            .saturating_duration_since(Instant::now())
            .as_secs()
    }
}

/// Immutable outcome of one completed job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    /// One embedding vector per file, in submission order.
    pub embeddings: Vec<Vec<f64>>,
    /// Extracted relational triples. Always empty today; reserved for
    /// semantic-extraction features.
    pub triples: Vec<String>,
    /// Original filenames, in submission order.
    pub filenames: Vec<String>,
    /// Extracted text per file, in submission order.
    pub filecontent: Vec<String>,
}

/// Status plus, once completed, the attached result.
#[derive(Debug, Clone)]
pub struct JobEntry {
    /// Current status record.
    pub status: JobStatus,
    /// Present iff `status.state` is [`JobState::Completed`].
    pub result: Option<JobResult>,
}

/// Registry of all jobs known to this process, keyed by job id.
///
/// One `RwLock` guards the whole map: status and result are written in a single
/// critical section, so a reader can never observe a `completed` state without
/// the corresponding result. Critical sections never span an await point.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: RwLock<HashMap<String, JobEntry>>,
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh job in the `Processing` state with the given completion hint.
    pub fn create(&self, id: &str, deadline: Instant) -> Result<(), RegistryError> {
        let mut jobs = self.jobs.write().expect("job registry lock poisoned");
        if jobs.contains_key(id) {
            return Err(RegistryError::DuplicateJob(id.to_string()));
        }
        jobs.insert(
            id.to_string(),
            JobEntry {
                status: JobStatus {
                    state: JobState::Processing,
                    deadline,
                    error: None,
                },
                result: None,
            },
        );
        Ok(())
    }

    /// Transition a job to `Completed`, attaching its result atomically.
    pub fn complete(&self, id: &str, result: JobResult) -> Result<(), RegistryError> {
        let mut jobs = self.jobs.write().expect("job registry lock poisoned");
        let entry = jobs
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownJob(id.to_string()))?;
        entry.status.state = JobState::Completed;
        entry.status.error = None;
        entry.result = Some(result);
        Ok(())
    }

    /// Transition a job to `Failed` with a diagnostic message; no result is attached.
    pub fn fail(&self, id: &str, message: impl Into<String>) -> Result<(), RegistryError> {
        let mut jobs = self.jobs.write().expect("job registry lock poisoned");
        let entry = jobs
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownJob(id.to_string()))?;
        entry.status.state = JobState::Failed;
        entry.status.error = Some(message.into());
        Ok(())
    }

    /// Snapshot the entry for a job, or `None` if the id is unknown.
    pub fn get(&self, id: &str) -> Option<JobEntry> {
        let jobs = self.jobs.read().expect("job registry lock poisoned");
        jobs.get(id).cloned()
    }

    /// Number of jobs currently tracked.
    pub fn len(&self) -> usize {
        self.jobs.read().expect("job registry lock poisoned").len()
    }

    /// Whether the registry holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
