//! Spreadsheet reading (first worksheet, first row is the header).

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// A cell reduced to the shapes a column can be inferred from.
#[derive(Debug, Clone, PartialEq)]
enum SheetCell {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&Data> for SheetCell {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => Self::Empty,
            Data::Int(v) => Self::Int(*v),
            // Workbooks store every number as a float; keep integral values integral.
            Data::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Self::Int(*v as i64),
            Data::Float(v) => Self::Float(*v),
            Data::String(s) if s.trim().is_empty() => Self::Empty,
            Data::String(s) => Self::Text(s.trim().to_string()),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Reads the first worksheet of a workbook into a DataFrame.
///
/// Column types are inferred per column: all integers → `Int64`, all numbers
/// → `Float64`, anything else → `String`. Empty cells become nulls.
pub fn read_spreadsheet(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let spreadsheet_error = |message: String| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| spreadsheet_error("workbook has no worksheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| spreadsheet_error(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let headers: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_name(cell, idx))
        .collect();
    let body: Vec<Vec<SheetCell>> = rows
        .map(|row| row.iter().map(SheetCell::from).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| *cell != SheetCell::Empty))
        .collect();

    let columns = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&SheetCell> = body
                .iter()
                .map(|row| row.get(idx).unwrap_or(&SheetCell::Empty))
                .collect();
            build_column(name, &cells)
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn header_name(cell: &Data, idx: usize) -> String {
    let name = cell.to_string();
    let trimmed = name.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        format!("column_{}", idx + 1)
    } else {
        trimmed.to_string()
    }
}

fn build_column(name: &str, cells: &[&SheetCell]) -> Column {
    let all_int = cells
        .iter()
        .all(|cell| matches!(cell, SheetCell::Empty | SheetCell::Int(_)));
    let all_numeric = cells
        .iter()
        .all(|cell| matches!(cell, SheetCell::Empty | SheetCell::Int(_) | SheetCell::Float(_)));
    let any_value = cells.iter().any(|cell| **cell != SheetCell::Empty);

    if any_value && all_int {
        let values: Vec<Option<i64>> = cells
            .iter()
            .map(|cell| match cell {
                SheetCell::Int(v) => Some(*v),
                _ => None,
            })
            .collect();
        return Series::new(name.into(), values).into_column();
    }
    if any_value && all_numeric {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| match cell {
                SheetCell::Int(v) => Some(*v as f64),
                SheetCell::Float(v) => Some(*v),
                _ => None,
            })
            .collect();
        return Series::new(name.into(), values).into_column();
    }
    let values: Vec<Option<String>> = cells
        .iter()
        .map(|cell| match cell {
            SheetCell::Empty => None,
            SheetCell::Int(v) => Some(v.to_string()),
            SheetCell::Float(v) => Some(v.to_string()),
            SheetCell::Text(s) => Some(s.clone()),
        })
        .collect();
    Series::new(name.into(), values).into_column()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_become_ints() {
        assert_eq!(SheetCell::from(&Data::Float(3.0)), SheetCell::Int(3));
        assert_eq!(SheetCell::from(&Data::Float(3.5)), SheetCell::Float(3.5));
        assert_eq!(SheetCell::from(&Data::String("  ".into())), SheetCell::Empty);
    }

    #[test]
    fn integer_column_with_gaps_is_int64() {
        let cells = [SheetCell::Int(1), SheetCell::Empty, SheetCell::Int(3)];
        let refs: Vec<&SheetCell> = cells.iter().collect();
        let column = build_column("customer_id", &refs);
        assert_eq!(column.dtype(), &DataType::Int64);
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn mixed_numeric_column_is_float64() {
        let cells = [SheetCell::Int(1), SheetCell::Float(2.5)];
        let refs: Vec<&SheetCell> = cells.iter().collect();
        assert_eq!(build_column("value", &refs).dtype(), &DataType::Float64);
    }

    #[test]
    fn text_column_keeps_numbers_as_text() {
        let cells = [SheetCell::Text("Ana".into()), SheetCell::Int(7)];
        let refs: Vec<&SheetCell> = cells.iter().collect();
        let column = build_column("name", &refs);
        assert_eq!(column.dtype(), &DataType::String);
        assert_eq!(column.str().unwrap().get(1), Some("7"));
    }

    #[test]
    fn blank_header_gets_positional_name() {
        assert_eq!(header_name(&Data::Empty, 2), "column_3");
        assert_eq!(header_name(&Data::String(" name ".into()), 0), "name");
    }

    #[test]
    fn missing_workbook_is_not_found() {
        let result = read_spreadsheet(Path::new("/nonexistent/clientes.xlsx"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
