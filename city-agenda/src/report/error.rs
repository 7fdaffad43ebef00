//! Report error types.

use std::path::PathBuf;

/// Errors while rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// HTML template failed to render
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output file could not be written
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
