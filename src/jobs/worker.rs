//! Detached per-job task: clean each file concurrently, embed once, write back.

use crate::embedding::EmbeddingClient;
use crate::jobs::{JobRegistry, JobResult, SourceFile, clean_text};
use futures_util::future::join_all;
use std::sync::Arc;

/// Run one job to completion, recording the outcome in the registry.
///
/// Spawns one cleaning subtask per file and joins them all before anything is
/// sent to the provider. The handle vector is built in submission order and
/// joined in that same order, so fragment *i* always belongs to filename *i*
/// no matter which subtask finishes first. The cleaned fragments then go out
/// as a single batched embedding call.
///
/// Provider failures (and subtask panics) are recorded as a `failed` status;
/// they are never surfaced to the submitting request, which has long since
/// been answered with the job id.
pub async fn run(
    registry: Arc<JobRegistry>,
    embedder: Arc<dyn EmbeddingClient + Send + Sync>,
    job_id: String,
    files: Vec<SourceFile>,
) {
    let handles: Vec<_> = files
        .iter()
        .map(|file| {
            let text = file.text.clone();
            tokio::spawn(async move { clean_text(&text) })
        })
        .collect();

    let mut fragments = Vec::with_capacity(files.len());
    for joined in join_all(handles).await {
        match joined {
            Ok(fragment) => fragments.push(fragment),
            Err(err) => {
                tracing::error!(job_id = %job_id, error = %err, "Cleaning subtask panicked");
                record_failure(&registry, &job_id, format!("text cleaning failed: {err}"));
                return;
            }
        }
    }

    tracing::debug!(job_id = %job_id, files = files.len(), "Corpus cleaned; requesting embeddings");

    match embedder.generate_embeddings(fragments).await {
        Ok(embeddings) => {
            let result = JobResult {
                embeddings,
                triples: Vec::new(),
                filenames: files.iter().map(|file| file.name.clone()).collect(),
                filecontent: files.into_iter().map(|file| file.text).collect(),
            };
            if let Err(err) = registry.complete(&job_id, result) {
                tracing::error!(job_id = %job_id, error = %err, "Failed to record completion");
            } else {
                tracing::info!(job_id = %job_id, "Job completed");
            }
        }
        Err(err) => {
            tracing::warn!(job_id = %job_id, error = %err, "Embedding provider call failed");
            record_failure(&registry, &job_id, err.to_string());
        }
    }
}

fn record_failure(registry: &JobRegistry, job_id: &str, message: String) {
    if let Err(err) = registry.fail(job_id, message) {
        tracing::error!(job_id = %job_id, error = %err, "Failed to record failure");
    }
}
