//! Conversion of uploaded bytes into normalized text.
//!
//! Formats are detected from the filename extension. Structured formats (CSV,
//! JSON, PDF) are parsed and re-rendered as plain text; everything else in the
//! supported set is decoded as UTF-8 verbatim.

use std::path::Path;
use thiserror::Error;

/// Errors raised while converting a document to text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Filename extension is not in the supported set.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    /// File declared as text was not valid UTF-8.
    #[error("file '{0}' is not valid UTF-8")]
    InvalidUtf8(String),
    /// CSV payload could not be parsed.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    /// JSON payload could not be parsed.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// PDF payload could not be parsed.
    #[error("failed to extract PDF text: {0}")]
    Pdf(String),
}

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Portable Document Format; text is pulled out of the content streams.
    Pdf,
    /// Comma-separated values; records are re-joined as tab-separated lines.
    Csv,
    /// JSON document; validated and pretty-printed.
    Json,
    /// Plain text carriers: txt, md, yml, xml.
    Text,
}

impl SourceFormat {
    /// Detect the format from a filename's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "txt" | "md" | "yml" | "xml" => Ok(Self::Text),
            _ => Err(ExtractError::UnsupportedType(filename.to_string())),
        }
    }
}

/// Convert raw uploaded bytes into normalized text for the given filename.
pub fn to_text(filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    match SourceFormat::from_filename(filename)? {
        SourceFormat::Pdf => pdf_to_text(bytes),
        SourceFormat::Csv => csv_to_text(bytes),
        SourceFormat::Json => json_to_text(bytes),
        SourceFormat::Text => String::from_utf8(bytes.to_vec())
            .map_err(|_| ExtractError::InvalidUtf8(filename.to_string())),
    }
}

fn pdf_to_text(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|err| ExtractError::Pdf(err.to_string()))
}

fn csv_to_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        lines.push(record.iter().collect::<Vec<_>>().join("\t"));
    }
    Ok(lines.join("\n"))
}

fn json_to_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    serde_json::to_string_pretty(&value).map_err(ExtractError::Json)
}
