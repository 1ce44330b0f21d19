pub mod columns;
pub mod diagnostics;
pub mod error;
pub mod settings;
pub mod sources;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{Result, SettingsError};
pub use settings::{
    ABSENCE_LIMIT, DEFAULT_ABSENCES, DEFAULT_BASE_DIR, MIN_AVERAGE, ReportSettings, VIP_THRESHOLD,
};
pub use sources::SourceFiles;
