//! Customer pipeline against files on disk.

use std::fs;

use polars::prelude::*;
use tabrep_model::{DiagnosticKind, ReportSettings, SourceFiles};
use tabrep_report::{build_customer_report, load_customers, load_orders, run_customer_report};

/// Two customers: 1 Ana, 2 Bob.
const CUSTOMERS_WORKBOOK: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/clientes.xlsx");

fn copy_customers(dir: &std::path::Path) {
    fs::copy(CUSTOMERS_WORKBOOK, SourceFiles::new(dir).customers()).unwrap();
}

/// Latin-1 encodes every char below U+0100 as a single byte.
fn latin1(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u8).collect()
}

fn write_orders(dir: &std::path::Path, body: &str) {
    let path = SourceFiles::new(dir).orders();
    fs::write(path, latin1(body)).unwrap();
}

fn customers() -> DataFrame {
    df!(
        "customer_id" => [1i64, 2],
        "name" => ["Ana", "Bob"],
        "email" => ["ana@example.com", "bob@example.com"],
    )
    .unwrap()
}

#[test]
fn totals_and_categories_per_customer() {
    let dir = tempfile::tempdir().unwrap();
    write_orders(
        dir.path(),
        "order_id;customer_id;value;note\no1;1;300000;envío\no2;1;250000;sí\no3;2;0;\n",
    );
    let settings = ReportSettings::new(dir.path());
    let orders = load_orders(&settings.files()).unwrap();
    assert!(!orders.is_substituted());

    let report = build_customer_report(&customers(), &orders.data, &settings)
        .unwrap()
        .unwrap();
    assert_eq!(report.height(), 2);

    let counts = report.column("order_count").unwrap();
    assert_eq!(counts.get(0).unwrap().extract::<i64>(), Some(2));
    assert_eq!(counts.get(1).unwrap().extract::<i64>(), Some(1));

    let totals = report.column("total_value").unwrap().f64().unwrap();
    assert_eq!(totals.get(0), Some(550_000.0));
    assert_eq!(totals.get(1), Some(0.0));

    let category = report.column("category").unwrap().str().unwrap();
    assert_eq!(category.get(0), Some("VIP"));
    assert_eq!(category.get(1), Some("Regular"));
}

#[test]
fn customers_without_orders_get_zero_totals() {
    let dir = tempfile::tempdir().unwrap();
    write_orders(dir.path(), "order_id;customer_id;value\no1;1;10\n");
    let settings = ReportSettings::new(dir.path());
    let orders = load_orders(&settings.files()).unwrap();

    let report = build_customer_report(&customers(), &orders.data, &settings)
        .unwrap()
        .unwrap();
    assert_eq!(report.height(), customers().height());
    let counts = report.column("order_count").unwrap();
    assert_eq!(counts.get(1).unwrap().extract::<i64>(), Some(0));
    let totals = report.column("total_value").unwrap().f64().unwrap();
    assert_eq!(totals.get(1), Some(0.0));
}

#[test]
fn missing_customer_source_is_an_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let customers = load_customers(&SourceFiles::new(dir.path())).unwrap();
    assert!(customers.is_substituted());
    assert!(customers.is_empty());
    assert_eq!(customers.data.width(), 3);
}

#[test]
fn missing_sources_skip_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    write_orders(dir.path(), "order_id;customer_id;value\no1;1;10\n");
    let settings = ReportSettings::new(dir.path());

    let outcome = run_customer_report(&settings).unwrap();
    assert!(outcome.report.is_none());
    assert!(outcome.output_path.is_none());
    assert!(!settings.files().customer_report().exists());

    let kinds: Vec<DiagnosticKind> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert!(kinds.contains(&DiagnosticKind::MissingSource));
    assert!(kinds.contains(&DiagnosticKind::ReportSkipped));
    assert!(outcome.invoices.table.is_none());
}

#[test]
fn skipped_run_leaves_previous_report_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ReportSettings::new(dir.path());
    let previous = settings.files().customer_report();
    fs::write(&previous, "name,category\nOld,VIP\n").unwrap();

    let outcome = run_customer_report(&settings).unwrap();
    assert!(outcome.report.is_none());
    assert_eq!(
        fs::read_to_string(&previous).unwrap(),
        "name,category\nOld,VIP\n"
    );
}

#[test]
fn customer_workbook_loads_with_typed_columns() {
    let dir = tempfile::tempdir().unwrap();
    copy_customers(dir.path());
    let customers = load_customers(&SourceFiles::new(dir.path())).unwrap();
    assert!(!customers.is_substituted());
    assert_eq!(customers.data.shape(), (2, 3));
    let ids = customers.data.column("customer_id").unwrap().i64().unwrap();
    assert_eq!(ids.get(0), Some(1));
    let names = customers.data.column("name").unwrap().str().unwrap();
    assert_eq!(names.get(1), Some("Bob"));
}

#[test]
fn full_run_writes_the_customer_report() {
    let dir = tempfile::tempdir().unwrap();
    copy_customers(dir.path());
    write_orders(
        dir.path(),
        "order_id;customer_id;value\no1;1;300000\no2;1;250000\no3;2;0\n",
    );
    let settings = ReportSettings::new(dir.path());

    let outcome = run_customer_report(&settings).unwrap();
    let path = settings.files().customer_report();
    assert_eq!(outcome.output_path.as_deref(), Some(path.as_path()));
    let written = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "customer_id,name,email,order_count,total_value,category"
    );
    assert!(lines[1].starts_with("1,Ana,ana@example.com,2,550000"));
    assert!(lines[1].ends_with(",VIP"));
    assert!(lines[2].starts_with("2,Bob,bob@example.com,1,0"));
    assert!(lines[2].ends_with(",Regular"));
    // Only the invoice document is missing.
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::MissingSource);
}

#[test]
fn empty_orders_run_reports_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    copy_customers(dir.path());
    write_orders(dir.path(), "order_id;customer_id;value\n");
    let settings = ReportSettings::new(dir.path());

    let outcome = run_customer_report(&settings).unwrap();
    assert_eq!(outcome.customers.record_count(), 2);
    assert!(outcome.orders.is_empty());
    assert!(!outcome.orders.is_substituted());
    assert!(outcome.report.is_none());
    assert!(!settings.files().customer_report().exists());
    assert!(
        outcome
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::ReportSkipped)
    );
}

#[test]
fn unreadable_invoice_document_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    copy_customers(dir.path());
    write_orders(dir.path(), "order_id;customer_id;value\no1;1;10\n");
    let settings = ReportSettings::new(dir.path());
    fs::write(settings.files().invoices(), b"not a pdf at all").unwrap();

    let outcome = run_customer_report(&settings).unwrap();
    assert!(outcome.invoices.table.is_none());
    let failure = outcome.invoices.diagnostic.as_ref().unwrap();
    assert_eq!(failure.kind, DiagnosticKind::ExtractionFailed);
    assert!(outcome.diagnostics.contains(failure));
    assert!(outcome.report.is_some());
    assert!(settings.files().customer_report().exists());
}
