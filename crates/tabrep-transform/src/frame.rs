//! Source frame type carrying a loaded table and where it came from.

use std::path::PathBuf;

use polars::prelude::DataFrame;

use crate::ops::empty_frame;

/// How a source frame was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOrigin {
    /// Read from a file on disk.
    File(PathBuf),
    /// The file was absent; an empty table with the expected columns stands in.
    Substituted(PathBuf),
}

/// A loaded source table with its label and provenance.
///
/// Downstream logic only looks at `data`: a substituted frame behaves
/// exactly like a real file with a header and no rows.
#[derive(Debug, Clone)]
pub struct SourceFrame {
    /// Human-readable label used in previews (e.g. "Customers").
    pub label: String,
    /// The table contents.
    pub data: DataFrame,
    pub origin: FrameOrigin,
}

impl SourceFrame {
    pub fn from_file(label: impl Into<String>, path: impl Into<PathBuf>, data: DataFrame) -> Self {
        Self {
            label: label.into(),
            data,
            origin: FrameOrigin::File(path.into()),
        }
    }

    /// An empty stand-in for a missing source.
    pub fn substituted(
        label: impl Into<String>,
        path: impl Into<PathBuf>,
        columns: &[&str],
    ) -> Self {
        Self {
            label: label.into(),
            data: empty_frame(columns),
            origin: FrameOrigin::Substituted(path.into()),
        }
    }

    /// Returns the number of records in the frame.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    pub fn is_substituted(&self) -> bool {
        matches!(self.origin, FrameOrigin::Substituted(_))
    }

    pub fn path(&self) -> &std::path::Path {
        match &self.origin {
            FrameOrigin::File(path) | FrameOrigin::Substituted(path) => path,
        }
    }
}
