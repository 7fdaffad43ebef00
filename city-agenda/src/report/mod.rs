//! Rendering search results.
//!
//! A [`Report`] holds one row per event; it can be rendered as a
//! standalone HTML page or as JSON and written to disk.

mod error;
mod templates;
mod view;

use std::path::Path;

use askama::Template;
use tracing::info;

pub use error::ReportError;
pub use templates::ReportTemplate;
pub use view::{EventRow, Report};

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
}

/// Render a report in the given format.
pub fn render(report: &Report, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Html => Ok(ReportTemplate { report }.render()?),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Write rendered output to `path`.
///
/// Creates parent directories if they don't exist.
pub fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }

    std::fs::write(path, contents).map_err(io_error)?;
    info!(path = %path.display(), bytes = contents.len(), "wrote report");
    Ok(())
}
