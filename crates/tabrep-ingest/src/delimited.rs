//! Delimited text reading with explicit encoding and separator.
//!
//! The file is decoded to UTF-8 first, then handed to the Polars CSV reader
//! from memory.

use std::io::Cursor;
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Number of rows Polars inspects to infer column types.
pub const INFER_SCHEMA_ROWS: usize = 100;

/// Character encoding of a delimited source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, with an optional byte order mark.
    #[default]
    Utf8,
    /// ISO-8859-1. Decoded as windows-1252, its WHATWG superset.
    Latin1,
}

impl TextEncoding {
    /// Decode raw bytes to a UTF-8 string.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => {
                let (text, _) = UTF_8.decode_with_bom_removal(bytes);
                text.into_owned()
            }
            Self::Latin1 => {
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                text.into_owned()
            }
        }
    }
}

/// How a delimited file is laid out.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedOptions {
    pub separator: u8,
    pub encoding: TextEncoding,
    /// Parse ISO-like date columns into `Date` values.
    pub parse_dates: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            encoding: TextEncoding::Utf8,
            parse_dates: false,
        }
    }
}

impl DelimitedOptions {
    /// Semicolon-separated Latin-1 text, as exported by spreadsheet tools
    /// in Spanish-language locales.
    pub fn latin1_semicolon() -> Self {
        Self {
            separator: b';',
            encoding: TextEncoding::Latin1,
            parse_dates: false,
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_parse_dates(mut self, enable: bool) -> Self {
        self.parse_dates = enable;
        self
    }
}

/// Reads a delimited file into a DataFrame.
///
/// The file handle is closed before parsing starts.
pub fn read_delimited(path: &Path, options: &DelimitedOptions) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    let text = options.encoding.decode(&bytes);
    parse_delimited(&text, options).map_err(|e| match e {
        ParseFailure::Empty => IngestError::EmptyCsv {
            path: path.to_path_buf(),
        },
        ParseFailure::Polars(err) => IngestError::CsvParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
    })
}

enum ParseFailure {
    Empty,
    Polars(PolarsError),
}

fn parse_delimited(
    text: &str,
    options: &DelimitedOptions,
) -> std::result::Result<DataFrame, ParseFailure> {
    if text.trim().is_empty() {
        return Err(ParseFailure::Empty);
    }
    let parse_options = CsvParseOptions::default()
        .with_separator(options.separator)
        .with_try_parse_dates(options.parse_dates);
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(parse_options)
        .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
        .finish()
        .map_err(ParseFailure::Polars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_latin1_decoding_keeps_accents() {
        // "Peña" and "Gómez" in ISO-8859-1.
        let bytes = b"name\nPe\xf1a\nG\xf3mez\n";
        let text = TextEncoding::Latin1.decode(bytes);
        assert_eq!(text, "name\nPeña\nGómez\n");
    }

    #[test]
    fn test_utf8_decoding_strips_bom() {
        let text = TextEncoding::Utf8.decode(b"\xef\xbb\xbfa,b\n1,2\n");
        assert_eq!(text, "a,b\n1,2\n");
    }

    #[test]
    fn test_read_semicolon_latin1() {
        let file = create_temp_file(b"order_id;customer_id;value\no1;1;300000\no2;1;250000\n");
        let df = read_delimited(file.path(), &DelimitedOptions::latin1_semicolon()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let values = df.column("value").unwrap().i64().unwrap();
        assert_eq!(values.get(0), Some(300_000));
    }

    #[test]
    fn test_comma_reader_misparses_semicolon_file() {
        let file = create_temp_file(b"order_id;customer_id;value\no1;1;300000\n");
        let df = read_delimited(file.path(), &DelimitedOptions::default()).unwrap();
        assert_eq!(df.width(), 1);
    }

    #[test]
    fn test_header_only_file_is_empty_frame() {
        let file = create_temp_file(b"order_id;customer_id;value\n");
        let df = read_delimited(file.path(), &DelimitedOptions::latin1_semicolon()).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_blank_file_is_error() {
        let file = create_temp_file(b"  \n");
        let result = read_delimited(file.path(), &DelimitedOptions::default());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = read_delimited(Path::new("/nonexistent/pedidos.csv"), &DelimitedOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
