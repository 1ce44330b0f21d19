//! Customer report: customers joined to their orders, totalled and classified.
//!
//! Stages:
//! 1. **Load**: customers (spreadsheet) and orders (Latin-1, `;`-separated);
//!    an absent file becomes an empty table with the expected columns.
//! 2. **Invoices**: best-effort table extraction from the invoice document.
//!    Informational only; never joined and never fatal.
//! 3. **Build**: left-join orders, total per customer, left-join totals back,
//!    classify VIP/Regular.
//! 4. **Output**: write the report CSV, or skip with a diagnostic when either
//!    input table is empty.

use std::path::PathBuf;

use polars::prelude::*;
use tracing::{info, info_span, warn};

use tabrep_ingest::{DelimitedOptions, extract_first_table, read_delimited, read_spreadsheet};
use tabrep_model::columns::{customer, customer_report, order};
use tabrep_model::{Diagnostic, ReportSettings, SourceFiles};
use tabrep_transform::{SourceFrame, column_names, fill_nulls_with_zero, left_join_on};

use crate::error::Result;
use crate::output::write_report_csv;

/// Outcome of the optional invoice extraction.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtraction {
    /// First table found in the document, if any.
    pub table: Option<SourceFrame>,
    /// Why no table is available, when that is the case.
    pub diagnostic: Option<Diagnostic>,
}

/// Everything a customer report run produced.
#[derive(Debug, Clone)]
pub struct CustomerReportOutcome {
    pub customers: SourceFrame,
    pub orders: SourceFrame,
    pub invoices: DocumentExtraction,
    /// `None` when the report was skipped.
    pub report: Option<DataFrame>,
    pub output_path: Option<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CustomerReportOutcome {
    /// The report narrowed to the preview columns that are present.
    pub fn preview(&self) -> Option<DataFrame> {
        let report = self.report.as_ref()?;
        let names = column_names(report);
        let selected: Vec<&str> = customer_report::PREVIEW
            .iter()
            .copied()
            .filter(|name| names.iter().any(|existing| existing == name))
            .collect();
        report.select(selected).ok()
    }
}

pub fn load_customers(files: &SourceFiles) -> Result<SourceFrame> {
    let path = files.customers();
    if !path.exists() {
        warn!(path = %path.display(), "customer source not found, using empty table");
        return Ok(SourceFrame::substituted("Customers", path, &customer::EXPECTED));
    }
    let data = read_spreadsheet(&path)?;
    info!(path = %path.display(), rows = data.height(), "loaded customers");
    Ok(SourceFrame::from_file("Customers", path, data))
}

pub fn load_orders(files: &SourceFiles) -> Result<SourceFrame> {
    let path = files.orders();
    if !path.exists() {
        warn!(path = %path.display(), "order source not found, using empty table");
        return Ok(SourceFrame::substituted("Orders", path, &order::EXPECTED));
    }
    let data = read_delimited(&path, &DelimitedOptions::latin1_semicolon())?;
    info!(path = %path.display(), rows = data.height(), "loaded orders");
    Ok(SourceFrame::from_file("Orders", path, data))
}

/// Never fails: every problem becomes a diagnostic.
pub fn load_invoices(files: &SourceFiles) -> DocumentExtraction {
    let path = files.invoices();
    if !path.exists() {
        warn!(path = %path.display(), "invoice document not found");
        return DocumentExtraction {
            table: None,
            diagnostic: Some(Diagnostic::missing_source(path)),
        };
    }
    match extract_first_table(&path) {
        Ok(data) => {
            info!(
                path = %path.display(),
                rows = data.height(),
                columns = data.width(),
                "extracted invoice table"
            );
            DocumentExtraction {
                table: Some(SourceFrame::from_file("Invoices", path, data)),
                diagnostic: None,
            }
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "invoice extraction failed, continuing without it");
            DocumentExtraction {
                table: None,
                diagnostic: Some(Diagnostic::extraction_failed(path, &error)),
            }
        }
    }
}

/// Builds one row per customer with order totals and a category.
///
/// Returns `None` when either table has no rows.
pub fn build_customer_report(
    customers: &DataFrame,
    orders: &DataFrame,
    settings: &ReportSettings,
) -> Result<Option<DataFrame>> {
    if customers.height() == 0 || orders.height() == 0 {
        return Ok(None);
    }

    let customer_orders = left_join_on(customers, orders, &[customer::CUSTOMER_ID])?;
    let totals = customer_orders
        .lazy()
        .group_by_stable([col(customer::CUSTOMER_ID)])
        .agg([
            col(order::ORDER_ID)
                .count()
                .alias(customer_report::ORDER_COUNT),
            col(order::VALUE)
                .cast(DataType::Float64)
                .sum()
                .alias(customer_report::TOTAL_VALUE),
        ])
        .collect()?;
    let aggregates = [customer_report::ORDER_COUNT, customer_report::TOTAL_VALUE];
    let totals = fill_nulls_with_zero(totals, &aggregates)?;

    let report = left_join_on(customers, &totals, &[customer::CUSTOMER_ID])?;
    let report = fill_nulls_with_zero(report, &aggregates)?
        .lazy()
        .with_column(
            when(col(customer_report::TOTAL_VALUE).gt(lit(settings.vip_threshold)))
                .then(lit(customer_report::VIP))
                .otherwise(lit(customer_report::REGULAR))
                .alias(customer_report::CATEGORY),
        )
        .collect()?;
    Ok(Some(report))
}

/// Runs the customer pipeline end to end under `settings.base_dir`.
pub fn run_customer_report(settings: &ReportSettings) -> Result<CustomerReportOutcome> {
    settings.validate()?;
    let files = settings.files();
    let span = info_span!("customer_report", base_dir = %files.base_dir().display());
    let _guard = span.enter();

    let customers = load_customers(&files)?;
    let orders = load_orders(&files)?;
    let invoices = load_invoices(&files);

    let mut diagnostics: Vec<Diagnostic> = [&customers, &orders]
        .into_iter()
        .filter(|frame| frame.is_substituted())
        .map(|frame| Diagnostic::missing_source(frame.path()))
        .collect();
    diagnostics.extend(invoices.diagnostic.clone());

    let (report, output_path) = match build_customer_report(&customers.data, &orders.data, settings)? {
        Some(mut report) => {
            let path = files.customer_report();
            write_report_csv(&mut report, &path)?;
            info!(
                customers = customers.record_count(),
                orders = orders.record_count(),
                "customer report complete"
            );
            (Some(report), Some(path))
        }
        None => {
            warn!(
                customers = customers.record_count(),
                orders = orders.record_count(),
                "customer report skipped: customer or order data missing"
            );
            diagnostics.push(Diagnostic::report_skipped(
                "customer report not created: customer or order data is missing",
            ));
            (None, None)
        }
    };

    Ok(CustomerReportOutcome {
        customers,
        orders,
        invoices,
        report,
        output_path,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_orders_skip_the_report() {
        let customers = df!("customer_id" => [1i64], "name" => ["Ana"]).unwrap();
        let orders = tabrep_transform::empty_frame(&order::EXPECTED);
        let report =
            build_customer_report(&customers, &orders, &ReportSettings::default()).unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn threshold_is_strict() {
        let customers = df!("customer_id" => [1i64, 2], "name" => ["Ana", "Bob"]).unwrap();
        let orders = df!(
            "order_id" => ["o1", "o2"],
            "customer_id" => [1i64, 2],
            "value" => [500_000i64, 500_001],
        )
        .unwrap();
        let report = build_customer_report(&customers, &orders, &ReportSettings::default())
            .unwrap()
            .unwrap();
        let category = report.column("category").unwrap().str().unwrap();
        assert_eq!(category.get(0), Some("Regular"));
        assert_eq!(category.get(1), Some("VIP"));
    }

    #[test]
    fn threshold_comes_from_settings() {
        let customers = df!("customer_id" => [1i64], "name" => ["Ana"]).unwrap();
        let orders = df!(
            "order_id" => ["o1"],
            "customer_id" => [1i64],
            "value" => [150i64],
        )
        .unwrap();
        let settings = ReportSettings::default().with_vip_threshold(100.0);
        let report = build_customer_report(&customers, &orders, &settings)
            .unwrap()
            .unwrap();
        let category = report.column("category").unwrap().str().unwrap();
        assert_eq!(category.get(0), Some("VIP"));
    }
}
