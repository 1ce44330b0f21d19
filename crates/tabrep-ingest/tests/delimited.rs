//! Tests for delimited source reading.

use std::fs;
use std::path::PathBuf;

use tabrep_ingest::{DelimitedOptions, TextEncoding, read_delimited};

fn temp_file(name: &str, contents: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    (dir, path)
}

#[test]
fn reads_latin1_names_without_corruption() {
    let (_dir, path) = temp_file(
        "pedidos.csv",
        b"order_id;customer_id;value;note\no1;1;300000;Pe\xf1a\no2;2;0;caf\xe9\n",
    );
    let df = read_delimited(&path, &DelimitedOptions::latin1_semicolon()).expect("read");
    let notes = df.column("note").unwrap().str().unwrap();
    assert_eq!(notes.get(0), Some("Peña"));
    assert_eq!(notes.get(1), Some("café"));
}

#[test]
fn utf8_reader_with_custom_separator() {
    let (_dir, path) = temp_file("x.csv", "a|b\n1|ñ\n".as_bytes());
    let options = DelimitedOptions::default()
        .with_separator(b'|')
        .with_encoding(TextEncoding::Utf8);
    let df = read_delimited(&path, &options).expect("read");
    assert_eq!(df.shape(), (1, 2));
    assert_eq!(df.column("b").unwrap().str().unwrap().get(0), Some("ñ"));
}

#[test]
fn parse_dates_yields_date_column() {
    let (_dir, path) = temp_file(
        "sesiones.csv",
        b"session_id,date\n1,2024-02-10\n2,2024-05-01\n",
    );
    let options = DelimitedOptions::default().with_parse_dates(true);
    let df = read_delimited(&path, &options).expect("read");
    assert_eq!(
        df.column("date").unwrap().dtype(),
        &polars::prelude::DataType::Date
    );
}
