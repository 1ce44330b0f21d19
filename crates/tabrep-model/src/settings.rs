//! Report settings and the named defaults behind them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};
use crate::sources::SourceFiles;

/// Directory read from and written to when none is given.
pub const DEFAULT_BASE_DIR: &str = "/mnt/data";
/// Customers strictly above this total order value are VIP.
pub const VIP_THRESHOLD: f64 = 500_000.0;
/// Students with strictly more absences than this are at risk.
pub const ABSENCE_LIMIT: i64 = 10;
/// Students with a global average strictly below this are at risk.
pub const MIN_AVERAGE: f64 = 3.0;
/// Absence count assumed when the student table has no value.
pub const DEFAULT_ABSENCES: i64 = 0;

/// Settings shared by both report pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Directory holding every input and receiving every output.
    pub base_dir: PathBuf,
    /// VIP classification cutoff for `total_value` (strict `>`).
    pub vip_threshold: f64,
    /// Absence count above which a student is flagged (strict `>`).
    pub absence_limit: i64,
    /// Global average below which a student is flagged (strict `<`).
    pub min_average: f64,
    /// Value used for missing absences.
    pub default_absences: i64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            vip_threshold: VIP_THRESHOLD,
            absence_limit: ABSENCE_LIMIT,
            min_average: MIN_AVERAGE,
            default_absences: DEFAULT_ABSENCES,
        }
    }
}

impl ReportSettings {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_vip_threshold(mut self, threshold: f64) -> Self {
        self.vip_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_absence_limit(mut self, limit: i64) -> Self {
        self.absence_limit = limit;
        self
    }

    #[must_use]
    pub fn with_min_average(mut self, average: f64) -> Self {
        self.min_average = average;
        self
    }

    #[must_use]
    pub fn with_default_absences(mut self, absences: i64) -> Self {
        self.default_absences = absences;
        self
    }

    pub fn files(&self) -> SourceFiles {
        SourceFiles::new(&self.base_dir)
    }

    /// Reject thresholds that would make every comparison meaningless.
    pub fn validate(&self) -> Result<()> {
        if !self.vip_threshold.is_finite() {
            return Err(SettingsError::NonFiniteThreshold {
                name: "vip_threshold",
                value: self.vip_threshold,
            });
        }
        if !self.min_average.is_finite() {
            return Err(SettingsError::NonFiniteThreshold {
                name: "min_average",
                value: self.min_average,
            });
        }
        if self.absence_limit < 0 || self.default_absences < 0 {
            return Err(SettingsError::NegativeAbsences {
                limit: self.absence_limit,
                default: self.default_absences,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_named_constants() {
        let settings = ReportSettings::default();
        assert_eq!(settings.base_dir, PathBuf::from("/mnt/data"));
        assert_eq!(settings.vip_threshold, 500_000.0);
        assert_eq!(settings.absence_limit, 10);
        assert_eq!(settings.min_average, 3.0);
        assert_eq!(settings.default_absences, 0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn builders_override_thresholds() {
        let settings = ReportSettings::new("/tmp/reports")
            .with_vip_threshold(1000.0)
            .with_absence_limit(3)
            .with_min_average(2.5);
        assert_eq!(settings.files().base_dir(), PathBuf::from("/tmp/reports"));
        assert_eq!(settings.vip_threshold, 1000.0);
        assert_eq!(settings.absence_limit, 3);
        assert_eq!(settings.min_average, 2.5);
    }

    #[test]
    fn validate_rejects_nan_threshold() {
        let settings = ReportSettings::default().with_vip_threshold(f64::NAN);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonFiniteThreshold {
                name: "vip_threshold",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_negative_absences() {
        let settings = ReportSettings::default().with_absence_limit(-1);
        assert!(settings.validate().is_err());
    }
}
