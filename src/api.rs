//! HTTP surface for Quiver.
//!
//! This module exposes a compact Axum router with the job pipeline endpoints:
//!
//! - `POST /process` – Accept a multipart batch of files, extract their text, and start an
//!   asynchronous embedding job. Returns `{ "object_id": <id> }` immediately.
//! - `GET /status` – Report a job's lifecycle state, the remaining completion hint in
//!   seconds, and any failure message.
//! - `GET /result` – Return the completed job's embeddings, filenames, and extracted text.
//! - `GET /export` – Download the result rendered as CSV or JSON.
//! - `POST /export-chroma` – Publish the result into a ChromaDB collection.
//! - `POST /query` – Embed caller-supplied text and run a similarity search against a
//!   ChromaDB collection, relaying Chroma's response as-is.
//!
//! Validation failures are rejected synchronously and never create a job. Failures inside
//! the detached worker are surfaced through `/status` and `/result`, never to the original
//! submitter.

use crate::chroma::{ChromaClient, ChromaError, CollectionPayload, ConnectionParams};
use crate::embedding::{EmbeddingClient, EmbeddingClientError};
use crate::export::{self, ExportError, ExportFormat};
use crate::extract::{self, ExtractError};
use crate::jobs::{self, JobRegistry, JobState, RegistryError, SourceFile, worker};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;

/// Shared handler state: the job registry plus the embedding backend.
#[derive(Clone)]
pub struct AppState {
    /// Registry holding every job this process has accepted.
    pub registry: Arc<JobRegistry>,
    /// Embedding backend handed to each spawned worker.
    pub embedder: Arc<dyn EmbeddingClient + Send + Sync>,
}

/// Largest multipart upload `POST /process` accepts.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Build the HTTP router exposing the pipeline API surface.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/process", post(process_batch))
        .route("/status", get(job_status))
        .route("/result", get(job_result))
        .route("/export", get(export_result))
        .route("/export-chroma", post(publish_to_chroma))
        .route("/query", post(query_collection))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Error surface shared by all handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or unsupported input; no job was created.
    #[error("{0}")]
    Validation(String),
    /// Unknown job identifier.
    #[error("object_id not found")]
    NotFound,
    /// Job exists but the worker has not finished.
    #[error("result not ready")]
    NotReady,
    /// Worker recorded a failure for this job.
    #[error("job failed: {0}")]
    Failed(String),
    /// A downstream collaborator rejected the request.
    #[error("{message}")]
    Upstream {
        /// Status reported by the collaborator, relayed verbatim.
        status: StatusCode,
        /// Collaborator's failure description.
        message: String,
    },
    /// Unexpected local fault.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::NotReady => (StatusCode::ACCEPTED, self.to_string()),
            Self::Failed(message) => (StatusCode::BAD_GATEWAY, message),
            Self::Upstream { status, message } => (status, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, message).into_response()
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnsupportedFormat(_) => Self::Validation(err.to_string()),
            ExportError::Csv(_) | ExportError::Json(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<EmbeddingClientError> for ApiError {
    fn from(err: EmbeddingClientError) -> Self {
        Self::Upstream {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ChromaError> for ApiError {
    fn from(err: ChromaError) -> Self {
        Self::Upstream {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

/// Success response for `POST /process`.
#[derive(Serialize)]
struct ProcessResponse {
    object_id: String,
}

/// Accept a multipart batch, extract text synchronously, and launch the worker.
///
/// Any validation or extraction failure aborts the whole submission before a
/// job id is minted, so partial jobs never exist. The worker is detached; the
/// caller gets the id back without waiting on embeddings.
async fn process_batch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::Validation(format!("failed to parse upload: {err}")))?
    {
        if field.name() != Some("files") {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            return Err(ApiError::Validation("upload field is missing a filename".into()));
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::Validation(format!("failed to read '{filename}': {err}")))?;
        tracing::debug!(filename = %filename, size = bytes.len(), "Received file");

        let text = extract::to_text(&filename, &bytes)?;
        files.push(SourceFile { name: filename, text });
    }

    if files.is_empty() {
        return Err(ApiError::Validation("no files uploaded".into()));
    }

    let object_id = Uuid::new_v4().to_string();
    state
        .registry
        .create(&object_id, Instant::now() + jobs::ETA_HORIZON)?;
    tracing::info!(object_id = %object_id, files = files.len(), "Job accepted");

    tokio::spawn(worker::run(
        state.registry.clone(),
        state.embedder.clone(),
        object_id.clone(),
        files,
    ));

    Ok(Json(ProcessResponse { object_id }))
}

/// Query parameters shared by the read-only endpoints.
#[derive(Deserialize)]
struct StatusParams {
    object_id: Option<String>,
}

/// Response body for `GET /status`.
#[derive(Serialize)]
struct StatusResponse {
    status: JobState,
    eta_seconds: u64,
    error_message: String,
}

/// Report the lifecycle state of one job.
async fn job_status(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<Json<StatusResponse>, ApiError> {
    let object_id = require_object_id(params.object_id)?;
    let entry = state.registry.get(&object_id).ok_or(ApiError::NotFound)?;

    Ok(Json(StatusResponse {
        status: entry.status.state,
        eta_seconds: entry.status.eta_seconds(),
        error_message: entry.status.error.unwrap_or_default(),
    }))
}

/// Return the completed result for one job as JSON.
async fn job_result(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<Json<jobs::JobResult>, ApiError> {
    let object_id = require_object_id(params.object_id)?;
    let result = completed_result(&state, &object_id)?;
    Ok(Json(result))
}

/// Query parameters for `GET /export`.
#[derive(Deserialize)]
struct ExportParams {
    object_id: Option<String>,
    format: Option<String>,
}

/// Download the result rendered in the requested format.
async fn export_result(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> Result<Response, ApiError> {
    let object_id = require_object_id(params.object_id)?;
    let format = params
        .format
        .ok_or_else(|| ApiError::Validation("missing format".into()))
        .and_then(|raw| ExportFormat::from_str(&raw).map_err(ApiError::from))?;

    let result = completed_result(&state, &object_id)?;
    let body = export::render(&result, format)?;

    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", format.attachment_name()),
        ),
    ];
    Ok((headers, body).into_response())
}

/// Query parameters for `POST /export-chroma`.
#[derive(Deserialize)]
struct PublishParams {
    object_id: Option<String>,
    operation: Option<String>,
}

/// Collection write modes supported by the publish endpoint.
enum PublishOperation {
    Add,
    Update,
}

impl FromStr for PublishOperation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "update" => Ok(Self::Update),
            other => Err(ApiError::Validation(format!(
                "invalid operation param: {other}"
            ))),
        }
    }
}

/// Request body for `POST /export-chroma`.
#[derive(Deserialize)]
struct PublishRequest {
    /// Chroma connection coordinates.
    req: ConnectionParams,
    /// Metadata payload; ids, documents, and embeddings are filled in here.
    #[serde(default)]
    payload: CollectionPayload,
}

/// Push a completed job's vectors into a Chroma collection.
///
/// Filenames become record ids and the extracted text becomes the stored
/// documents. Chroma failures are relayed with the collaborator's own status.
async fn publish_to_chroma(
    State(state): State<AppState>,
    Query(params): Query<PublishParams>,
    Json(request): Json<PublishRequest>,
) -> Result<String, ApiError> {
    let object_id = require_object_id(params.object_id)?;
    let operation = params
        .operation
        .ok_or_else(|| ApiError::Validation("missing operation".into()))
        .and_then(|raw| raw.parse::<PublishOperation>())?;

    let result = completed_result(&state, &object_id)?;

    let mut payload = request.payload;
    payload.ids = result.filenames;
    payload.documents = result.filecontent;
    payload.embeddings = result.embeddings;

    let client = ChromaClient::new(&request.req)?;
    client.heartbeat().await?;
    match operation {
        PublishOperation::Add => client.add_records(&payload).await?,
        PublishOperation::Update => client.update_records(&payload).await?,
    }

    Ok("Chroma operation succeeded".to_string())
}

/// Number of neighbors requested per query vector.
const QUERY_RESULT_COUNT: usize = 10;

/// Request body for `POST /query`.
#[derive(Deserialize)]
struct QueryRequest {
    /// Chroma connection coordinates.
    req: ConnectionParams,
    /// Text to embed and search for.
    text: Vec<String>,
}

/// Embed the caller's text and run a similarity search against a collection.
///
/// The query shares the job pipeline's embedding backend but never touches the
/// registry; Chroma's response body is relayed untouched.
async fn query_collection(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if request.text.iter().all(|t| t.trim().is_empty()) {
        return Err(ApiError::Validation("no query text provided".into()));
    }

    let embeddings = state.embedder.generate_embeddings(request.text).await?;

    let client = ChromaClient::new(&request.req)?;
    let results = client
        .query_records(&embeddings, QUERY_RESULT_COUNT)
        .await?;
    Ok(Json(results))
}

fn require_object_id(raw: Option<String>) -> Result<String, ApiError> {
    raw.filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("missing object_id".into()))
}

/// Fetch the result for a completed job, mapping every other state to an error.
fn completed_result(state: &AppState, object_id: &str) -> Result<jobs::JobResult, ApiError> {
    let entry = state.registry.get(object_id).ok_or(ApiError::NotFound)?;
    match entry.status.state {
        JobState::Processing => Err(ApiError::NotReady),
        JobState::Failed => Err(ApiError::Failed(
            entry.status.error.unwrap_or_else(|| "unknown failure".into()),
        )),
        JobState::Completed => entry.result.ok_or_else(|| {
            ApiError::Internal("completed job is missing its result".into())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingClientError;
    use crate::jobs::clean_text;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use serde_json::Value;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tower::ServiceExt;

    const BOUNDARY: &str = "quiver-test-boundary";

    /// Derives each vector from its input text so positional alignment is checkable.
    struct KeyedProvider;

    #[async_trait]
    impl EmbeddingClient for KeyedProvider {
        async fn generate_embeddings(
            &self,
            texts: Vec<String>,
        ) -> Result<Vec<Vec<f64>>, EmbeddingClientError> {
            Ok(texts
                .into_iter()
                .map(|text| vec![text.len() as f64])
                .collect())
        }
    }

    /// Blocks until released, keeping jobs observable in the `processing` state.
    struct GatedProvider {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl EmbeddingClient for GatedProvider {
        async fn generate_embeddings(
            &self,
            texts: Vec<String>,
        ) -> Result<Vec<Vec<f64>>, EmbeddingClientError> {
            self.release.notified().await;
            Ok(texts.into_iter().map(|_| vec![1.0]).collect())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl EmbeddingClient for FailingProvider {
        async fn generate_embeddings(
            &self,
            _texts: Vec<String>,
        ) -> Result<Vec<Vec<f64>>, EmbeddingClientError> {
            Err(EmbeddingClientError::UnexpectedStatus {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "model overloaded".into(),
            })
        }
    }

    fn harness(embedder: Arc<dyn EmbeddingClient + Send + Sync>) -> (Router, AppState) {
        let state = AppState {
            registry: Arc::new(JobRegistry::new()),
            embedder,
        };
        (create_router(state.clone()), state)
    }

    fn multipart_body(files: &[(&str, &str)]) -> Body {
        let mut body = String::new();
        for (filename, content) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Body::from(body)
    }

    fn process_request(files: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/process")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_body(files))
            .expect("request")
    }

    async fn submit(app: &Router, files: &[(&str, &str)]) -> String {
        let response = app
            .clone()
            .oneshot(process_request(files))
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        json["object_id"].as_str().expect("object_id").to_string()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response")
    }

    async fn await_state(app: &Router, id: &str, wanted: &str) {
        for _ in 0..200 {
            let response = get(app, &format!("/status?object_id={id}")).await;
            assert_eq!(response.status(), StatusCode::OK);
            let json = json_body(response).await;
            if json["status"] == wanted {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("job {id} never reached state {wanted}");
    }

    #[tokio::test]
    async fn submission_reports_processing_until_released() {
        let release = Arc::new(Notify::new());
        let (app, _) = harness(Arc::new(GatedProvider {
            release: release.clone(),
        }));

        let id = submit(&app, &[("a.txt", "alpha content")]).await;

        let response = get(&app, &format!("/status?object_id={id}")).await;
        let json = json_body(response).await;
        assert_eq!(json["status"], "processing");
        assert!(json["eta_seconds"].as_u64().is_some());
        assert_eq!(json["error_message"], "");

        let not_ready = get(&app, &format!("/result?object_id={id}")).await;
        assert_eq!(not_ready.status(), StatusCode::ACCEPTED);

        release.notify_one();
        await_state(&app, &id, "completed").await;
    }

    #[tokio::test]
    async fn result_vectors_align_with_submission_order() {
        let (app, _) = harness(Arc::new(KeyedProvider));
        let files = [
            ("a.txt", "alpha"),
            ("b.txt", "bravo bravo bravo"),
            ("c.txt", "charlie charlie"),
        ];

        let id = submit(&app, &files).await;
        await_state(&app, &id, "completed").await;

        let response = get(&app, &format!("/result?object_id={id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;

        let filenames: Vec<&str> = json["filenames"]
            .as_array()
            .expect("filenames")
            .iter()
            .map(|v| v.as_str().expect("string"))
            .collect();
        assert_eq!(filenames, vec!["a.txt", "b.txt", "c.txt"]);

        let embeddings = json["embeddings"].as_array().expect("embeddings");
        assert_eq!(embeddings.len(), files.len());
        for (i, (_, content)) in files.iter().enumerate() {
            let expected = clean_text(content).len() as f64;
            assert_eq!(embeddings[i][0].as_f64(), Some(expected), "vector {i}");
        }
        assert_eq!(json["filecontent"][0], "alpha");
        assert_eq!(json["triples"].as_array().expect("triples").len(), 0);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_without_creating_a_job() {
        let (app, state) = harness(Arc::new(KeyedProvider));
        let response = app
            .clone()
            .oneshot(process_request(&[]))
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.registry.is_empty());
    }

    #[tokio::test]
    async fn unsupported_extension_aborts_the_whole_batch() {
        let (app, state) = harness(Arc::new(KeyedProvider));
        let response = app
            .clone()
            .oneshot(process_request(&[("a.txt", "fine"), ("image.png", "nope")]))
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert!(String::from_utf8_lossy(&bytes).contains("image.png"));
        assert!(state.registry.is_empty());
    }

    #[tokio::test]
    async fn wrong_method_on_process_is_rejected() {
        let (app, _) = harness(Arc::new(KeyedProvider));
        let response = get(&app, "/process").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_and_missing_ids_are_reported() {
        let (app, _) = harness(Arc::new(KeyedProvider));

        let response = get(&app, "/status?object_id=no-such-job").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = get(&app, "/result?object_id=no-such-job").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = get(&app, "/status").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = get(&app, "/export?object_id=no-such-job&format=csv").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn provider_failure_is_surfaced_not_swallowed() {
        let (app, _) = harness(Arc::new(FailingProvider));
        let id = submit(&app, &[("a.txt", "alpha")]).await;
        await_state(&app, &id, "failed").await;

        let response = get(&app, &format!("/status?object_id={id}")).await;
        let json = json_body(response).await;
        assert_ne!(json["error_message"], "");

        let response = get(&app, &format!("/result?object_id={id}")).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn csv_export_has_expected_shape() {
        let (app, _) = harness(Arc::new(KeyedProvider));
        let id = submit(&app, &[("a.txt", "alpha"), ("b.txt", "bravo")]).await;
        await_state(&app, &id, "completed").await;

        let response = get(&app, &format!("/export?object_id={id}&format=csv")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).expect("content type"),
            "text/csv"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let text = String::from_utf8(bytes.to_vec()).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Embeddings,Triple");
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn json_export_round_trips_the_result() {
        let (app, _) = harness(Arc::new(KeyedProvider));
        let id = submit(&app, &[("a.txt", "alpha")]).await;
        await_state(&app, &id, "completed").await;

        let exported = get(&app, &format!("/export?object_id={id}&format=json")).await;
        assert_eq!(exported.status(), StatusCode::OK);
        let exported_json = json_body(exported).await;

        let direct = get(&app, &format!("/result?object_id={id}")).await;
        let direct_json = json_body(direct).await;
        assert_eq!(exported_json, direct_json);
    }

    #[tokio::test]
    async fn bad_export_format_is_rejected() {
        let (app, _) = harness(Arc::new(KeyedProvider));
        let id = submit(&app, &[("a.txt", "alpha")]).await;
        await_state(&app, &id, "completed").await;

        let response = get(&app, &format!("/export?object_id={id}&format=xml")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = get(&app, &format!("/export?object_id={id}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn uploads_beyond_axums_default_body_limit_are_accepted() {
        let (app, _) = harness(Arc::new(KeyedProvider));
        // Axum caps request bodies at 2 MiB unless the router raises the limit.
        let big = "lorem ipsum ".repeat(256 * 1024);
        assert!(big.len() > 2 * 1024 * 1024);

        let id = submit(&app, &[("big.txt", &big)]).await;
        await_state(&app, &id, "completed").await;
    }

    #[test]
    fn export_faults_map_to_the_right_status() {
        let rejected = ApiError::from(ExportError::UnsupportedFormat("xml".into()));
        assert!(matches!(rejected, ApiError::Validation(_)));

        let encode_fault = serde_json::from_str::<Value>("{").expect_err("truncated json");
        let internal = ApiError::from(ExportError::Json(encode_fault));
        assert!(matches!(internal, ApiError::Internal(_)));
    }

    fn query_request(text: Value) -> Request<Body> {
        let body = serde_json::json!({
            "req": {
                "host": "localhost",
                "port": 8000,
                "tenant": "default_tenant",
                "database": "default_database",
                "collection_id": "docs"
            },
            "text": text
        });
        Request::builder()
            .method(Method::POST)
            .uri("/query")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn query_without_text_is_rejected() {
        let (app, _) = harness(Arc::new(KeyedProvider));
        let response = app
            .clone()
            .oneshot(query_request(serde_json::json!([])))
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(query_request(serde_json::json!(["   "])))
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn query_relays_embedding_failures_as_bad_gateway() {
        let (app, _) = harness(Arc::new(FailingProvider));
        let response = app
            .clone()
            .oneshot(query_request(serde_json::json!(["what is quiver"])))
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn publish_without_result_is_not_found() {
        let (app, _) = harness(Arc::new(KeyedProvider));
        let body = serde_json::json!({
            "req": {
                "host": "localhost",
                "port": 8000,
                "tenant": "default_tenant",
                "database": "default_database",
                "collection_id": "docs"
            }
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/export-chroma?object_id=no-such-job&operation=add")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
