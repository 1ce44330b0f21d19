//! Non-fatal conditions raised while building a report.
//!
//! Pipelines never escalate these; they are collected on the run outcome and
//! rendered after the previews.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A source file does not exist.
    MissingSource,
    /// The optional document source could not be turned into a table.
    ExtractionFailed,
    /// The report was not produced for this run.
    ReportSkipped,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingSource => "missing source",
            Self::ExtractionFailed => "extraction failed",
            Self::ReportSkipped => "report skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub path: Option<PathBuf>,
}

impl Diagnostic {
    pub fn missing_source(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            kind: DiagnosticKind::MissingSource,
            message: format!("source not found: {}", path.display()),
            path: Some(path),
        }
    }

    pub fn extraction_failed(path: impl Into<PathBuf>, detail: impl fmt::Display) -> Self {
        let path = path.into();
        Self {
            kind: DiagnosticKind::ExtractionFailed,
            message: format!("could not read {}: {detail}", path.display()),
            path: Some(path),
        }
    }

    pub fn report_skipped(reason: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::ReportSkipped,
            message: reason.into(),
            path: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}
