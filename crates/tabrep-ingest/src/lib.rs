//! Source ingestion for the report pipelines.
//!
//! Every loader returns a Polars [`DataFrame`](polars::prelude::DataFrame)
//! and closes its file handle before returning, on success and on error.

pub mod delimited;
pub mod document;
pub mod error;
pub mod polars_utils;
pub mod spreadsheet;

pub use delimited::{DelimitedOptions, INFER_SCHEMA_ROWS, TextEncoding, read_delimited};
pub use document::{TextTable, detect_first_table, extract_first_table, split_cells};
pub use error::{IngestError, Result};
pub use polars_utils::{any_to_string, format_numeric};
pub use spreadsheet::read_spreadsheet;
