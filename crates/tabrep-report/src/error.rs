//! Error types for report generation.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use tabrep_ingest::IngestError;
use tabrep_model::SettingsError;
use thiserror::Error;

/// Errors that abort a report run.
///
/// Missing sources and skipped reports are not errors; they surface as
/// diagnostics on the run outcome.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for ReportError {
    fn from(err: PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
