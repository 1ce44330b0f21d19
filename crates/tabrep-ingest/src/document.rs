//! Best-effort table extraction from PDF documents.
//!
//! Text is pulled out of the document and scanned for the first block of
//! lines that split into the same number of cells. The first line of that
//! block is taken as the header. Nothing about the result is guaranteed: the
//! schema is whatever the document happens to contain.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Minimum number of cells for a line to count as a table row.
pub const MIN_TABLE_COLUMNS: usize = 2;
/// Minimum number of lines (header included) for a block to count as a table.
pub const MIN_TABLE_LINES: usize = 2;

/// A table found in document text, before typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Extracts the first detected table from a PDF file.
///
/// The PDF parser is known to panic on some malformed documents; such
/// panics are caught and reported as [`IngestError::Pdf`].
pub fn extract_first_table(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = extract_text(path)?;
    let table = detect_first_table(&text).ok_or_else(|| IngestError::NoTables {
        path: path.to_path_buf(),
    })?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "detected document table"
    );
    text_table_to_frame(&table)
}

fn extract_text(path: &Path) -> Result<String> {
    let pdf_error = |message: String| IngestError::Pdf {
        path: path.to_path_buf(),
        message,
    };
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path)));
    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(error)) => Err(pdf_error(error.to_string())),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "parser panicked".to_string());
            Err(pdf_error(message))
        }
    }
}

/// Splits a text line into cells on tabs or runs of two or more spaces.
pub fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    for chunk in line.split('\t') {
        let mut current = String::new();
        let mut spaces = 0usize;
        for ch in chunk.chars() {
            if ch == ' ' {
                spaces += 1;
                continue;
            }
            if spaces >= 2 && !current.is_empty() {
                cells.push(std::mem::take(&mut current));
            } else if spaces == 1 && !current.is_empty() {
                current.push(' ');
            }
            spaces = 0;
            current.push(ch);
        }
        if !current.is_empty() {
            cells.push(current);
        }
    }
    cells
}

/// Finds the first block of consecutive lines with a consistent cell count.
pub fn detect_first_table(text: &str) -> Option<TextTable> {
    let mut block: Vec<Vec<String>> = Vec::new();
    for line in text.lines() {
        let cells = split_cells(line.trim());
        let fits = cells.len() >= MIN_TABLE_COLUMNS
            && block.first().is_none_or(|first| first.len() == cells.len());
        if fits {
            block.push(cells);
            continue;
        }
        if block.len() >= MIN_TABLE_LINES {
            break;
        }
        block.clear();
        if cells.len() >= MIN_TABLE_COLUMNS {
            block.push(cells);
        }
    }
    if block.len() < MIN_TABLE_LINES {
        return None;
    }
    let mut lines = block.into_iter();
    let headers = lines.next()?;
    Some(TextTable {
        headers,
        rows: lines.collect(),
    })
}

/// Converts a text table into a DataFrame of string columns.
pub fn text_table_to_frame(table: &TextTable) -> Result<DataFrame> {
    let mut seen = std::collections::BTreeSet::new();
    let columns = table
        .headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let mut name = header.clone();
            if !seen.insert(name.clone()) {
                name = format!("{header}_{}", idx + 1);
                seen.insert(name.clone());
            }
            let values: Vec<Option<String>> = table
                .rows
                .iter()
                .map(|row| row.get(idx).cloned())
                .collect();
            Series::new(name.into(), values).into_column()
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}
