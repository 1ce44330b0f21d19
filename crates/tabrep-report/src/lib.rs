//! Customer and academic report pipelines.
//!
//! Each pipeline loads its sources from a base directory, derives a report
//! table and writes it next to the sources as CSV. Missing inputs never
//! abort a run; they are reported as [`Diagnostic`](tabrep_model::Diagnostic)s
//! on the returned outcome.

pub mod academic;
pub mod customer;
pub mod error;
pub mod output;

pub use academic::{
    AcademicReportOutcome, AcademicSources, assemble_academic_report, attendance_summary,
    cohort_totals, flag_risk, global_averages, load_academic_sources, missing_academic_sources,
    run_academic_report, separate_subject_columns, session_periods, sessions_with_grade_level,
    student_cohorts, subject_averages,
};
pub use customer::{
    CustomerReportOutcome, DocumentExtraction, build_customer_report, load_customers,
    load_invoices, load_orders, run_customer_report,
};
pub use error::{ReportError, Result};
pub use output::write_report_csv;
