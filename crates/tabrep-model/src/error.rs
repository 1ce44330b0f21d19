use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{name} must be a finite number, got {value}")]
    NonFiniteThreshold { name: &'static str, value: f64 },
    #[error("absence settings must not be negative (limit {limit}, default {default})")]
    NegativeAbsences { limit: i64, default: i64 },
}

pub type Result<T> = std::result::Result<T, SettingsError>;
