use anyhow::{Context, Result};
use tracing::info;

use tabrep_model::ReportSettings;
use tabrep_report::{run_academic_report, run_customer_report};

use tabrep_cli::console::{print_academic_outcome, print_banner, print_customer_outcome};

pub fn run_customers(settings: &ReportSettings, preview_rows: usize) -> Result<()> {
    print_banner("CUSTOMER REPORT");
    let outcome = run_customer_report(settings).context("customer report")?;
    print_customer_outcome(&outcome, preview_rows);
    Ok(())
}

pub fn run_academic(settings: &ReportSettings, preview_rows: usize) -> Result<()> {
    print_banner("ACADEMIC REPORT");
    let outcome = run_academic_report(settings).context("academic report")?;
    print_academic_outcome(&outcome, preview_rows);
    Ok(())
}

/// Customers first, then academic; a failure in one does not stop the other.
pub fn run_all(settings: &ReportSettings, preview_rows: usize) -> Result<()> {
    let customers = run_customers(settings, preview_rows);
    let academic = run_academic(settings, preview_rows);
    info!(
        customers_ok = customers.is_ok(),
        academic_ok = academic.is_ok(),
        "all reports finished"
    );
    match (customers, academic) {
        (Err(error), Err(other)) => {
            eprintln!("error: {other:#}");
            Err(error)
        }
        (Err(error), Ok(())) | (Ok(()), Err(error)) => Err(error),
        (Ok(()), Ok(())) => Ok(()),
    }
}
