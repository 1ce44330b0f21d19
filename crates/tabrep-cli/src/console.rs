//! Console rendering: section banners, table previews and diagnostics.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use tabrep_ingest::any_to_string;
use tabrep_model::{Diagnostic, DiagnosticKind};
use tabrep_report::{AcademicReportOutcome, CustomerReportOutcome};
use tabrep_transform::SourceFrame;

pub const RULE_WIDTH: usize = 80;

/// Rows shown for each loaded source table.
pub const SOURCE_PREVIEW_ROWS: usize = 3;

const NULL_MARKER: &str = "null";

/// A `=` rule, the title, and another rule.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}")
}

/// Column names and the first `rows` rows as display strings.
///
/// Nulls render as `null`, never as an empty string.
pub fn preview_cells(df: &DataFrame, rows: usize) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let body = (0..rows.min(df.height()))
        .map(|idx| {
            df.get_columns()
                .iter()
                .map(|column| match column.get(idx) {
                    Ok(value) if !value.is_null() => any_to_string(value),
                    _ => NULL_MARKER.to_string(),
                })
                .collect()
        })
        .collect();
    (headers, body)
}

pub fn preview_table(df: &DataFrame, rows: usize) -> Table {
    let (headers, body) = preview_cells(df, rows);
    let mut table = Table::new();
    table.set_header(headers.iter().map(|name| header_cell(name)));
    apply_table_style(&mut table);
    for row in body {
        table.add_row(row.into_iter().map(|value| {
            if value == NULL_MARKER {
                dim_cell(value)
            } else {
                Cell::new(value)
            }
        }));
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn print_banner(title: &str) {
    println!("\n{}", banner(title));
}

pub fn print_preview(label: &str, df: &DataFrame, rows: usize) {
    println!(
        "\n{label} (first {} of {} rows):",
        rows.min(df.height()),
        df.height()
    );
    println!("{}", preview_table(df, rows));
}

fn print_source(frame: &SourceFrame) {
    if frame.is_substituted() {
        println!("\n{}: not found, using an empty table", frame.label);
        return;
    }
    print_preview(&frame.label, &frame.data, SOURCE_PREVIEW_ROWS);
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    println!();
    for diagnostic in diagnostics {
        let prefix = match diagnostic.kind {
            DiagnosticKind::MissingSource | DiagnosticKind::ExtractionFailed => "WARNING",
            DiagnosticKind::ReportSkipped => "NOTICE",
        };
        println!("{prefix}: {diagnostic}");
    }
}

pub fn print_customer_outcome(outcome: &CustomerReportOutcome, preview_rows: usize) {
    print_source(&outcome.customers);
    print_source(&outcome.orders);
    if let Some(invoices) = &outcome.invoices.table {
        print_source(invoices);
    }
    if let Some(preview) = outcome.preview() {
        print_preview("Customer report", &preview, preview_rows);
    }
    if let Some(path) = &outcome.output_path {
        println!("\nReport saved to: {}", path.display());
    }
    print_diagnostics(&outcome.diagnostics);
}

pub fn print_academic_outcome(outcome: &AcademicReportOutcome, preview_rows: usize) {
    if let Some(sources) = &outcome.sources {
        print_source(&sources.students);
        print_source(&sources.sessions);
        print_source(&sources.grades);
    }
    if let Some(report) = &outcome.report {
        if !outcome.subject_columns.is_empty() {
            println!("\nSubject areas: {}", outcome.subject_columns.join(", "));
        }
        print_preview("Academic report", report, preview_rows);
    }
    if let Some(path) = &outcome.output_path {
        println!("\nAcademic report saved to: {}", path.display());
    }
    print_diagnostics(&outcome.diagnostics);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
