//! Rendering of job results for file download.

use crate::jobs::JobResult;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while rendering a result for export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Requested format is not `csv` or `json`.
    #[error("unrecognized export format: {0}")]
    UnsupportedFormat(String),
    /// CSV writer failed.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    /// JSON serialization failed.
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Download formats offered by the export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Tabular export, one row per file.
    Csv,
    /// The full [`JobResult`] as a JSON document.
    Json,
}

impl ExportFormat {
    /// MIME type matching the rendered body.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }

    /// Suggested download filename for the `Content-Disposition` header.
    pub fn attachment_name(self) -> &'static str {
        match self {
            Self::Csv => "result.csv",
            Self::Json => "result.json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Render a result in the requested format.
pub fn render(result: &JobResult, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Csv => render_csv(result),
        ExportFormat::Json => render_json(result),
    }
}

/// Render the embeddings as CSV: header `Embeddings,Triple`, then one row per
/// file carrying that file's embedding scalars followed by its triple (empty
/// until semantic extraction lands).
fn render_csv(result: &JobResult) -> Result<Vec<u8>, ExportError> {
    // Rows are wider than the two-column header: one field per scalar.
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    writer.write_record(["Embeddings", "Triple"])?;

    for (i, vector) in result.embeddings.iter().enumerate() {
        let mut row: Vec<String> = vector.iter().map(f64::to_string).collect();
        row.push(result.triples.get(i).cloned().unwrap_or_default());
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Csv(err.into_error().into()))
}

fn render_json(result: &JobResult) -> Result<Vec<u8>, ExportError> {
    serde_json::to_vec_pretty(result).map_err(ExportError::Json)
}
