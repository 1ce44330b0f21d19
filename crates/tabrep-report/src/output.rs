//! CSV persistence for finished reports.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::info;

use crate::error::{ReportError, Result};

/// Writes a report as comma-separated UTF-8 with a header row, replacing
/// any existing file at `path`.
pub fn write_report_csv(report: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(report)?;
    info!(
        path = %path.display(),
        rows = report.height(),
        columns = report.width(),
        "report written"
    );
    Ok(())
}
