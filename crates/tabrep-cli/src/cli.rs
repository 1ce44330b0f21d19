//! CLI argument definitions for the report generator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use tabrep_model::{
    ABSENCE_LIMIT, DEFAULT_ABSENCES, DEFAULT_BASE_DIR, MIN_AVERAGE, ReportSettings, VIP_THRESHOLD,
};

#[derive(Parser)]
#[command(
    name = "tabrep",
    version,
    about = "Tabular reports - build customer and academic reports from data files",
    long_about = "Build consolidated reports from tabular sources in a data directory.\n\n\
                  customers: clientes.xlsx + pedidos.csv (+ facturas.pdf) -> reporte_clientes.csv\n\
                  academic:  estudiantes.csv + sesiones.csv + notas.csv -> reporte_academico.csv"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub report: ReportArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Build the customer report (reporte_clientes.csv).
    Customers,

    /// Build the academic report (reporte_academico.csv).
    Academic,

    /// Build both reports, customers first.
    All,
}

#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    /// Directory holding the source files; reports are written here too.
    #[arg(long = "base-dir", value_name = "DIR", default_value = DEFAULT_BASE_DIR, global = true)]
    pub base_dir: PathBuf,

    /// Total order value a customer must exceed to be classified VIP.
    #[arg(long = "vip-threshold", value_name = "AMOUNT", default_value_t = VIP_THRESHOLD, global = true)]
    pub vip_threshold: f64,

    /// Absences above this count put a student at risk.
    #[arg(long = "absence-limit", value_name = "COUNT", default_value_t = ABSENCE_LIMIT, global = true)]
    pub absence_limit: i64,

    /// Global averages below this value put a student at risk.
    #[arg(long = "min-average", value_name = "SCORE", default_value_t = MIN_AVERAGE, global = true)]
    pub min_average: f64,

    /// Absences assumed for students whose absence count is missing.
    #[arg(long = "default-absences", value_name = "COUNT", default_value_t = DEFAULT_ABSENCES, global = true)]
    pub default_absences: i64,

    /// Rows shown in each console preview.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = 10, global = true)]
    pub preview_rows: usize,
}

impl ReportArgs {
    pub fn settings(&self) -> ReportSettings {
        ReportSettings::new(&self.base_dir)
            .with_vip_threshold(self.vip_threshold)
            .with_absence_limit(self.absence_limit)
            .with_min_average(self.min_average)
            .with_default_absences(self.default_absences)
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
