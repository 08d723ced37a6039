//! Error types for the benchtier harness.

use thiserror::Error;

/// Setting model and configuration errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Setting `{0}` is used in a layer but was never registered")]
    Unregistered(&'static str),

    #[error("Setting name `{name}` is already registered by a different type")]
    DuplicateName { name: &'static str },

    #[error("Invalid value {value:?} for setting `{setting}`: {reason}")]
    InvalidValue {
        setting: &'static str,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SettingsError {
    pub(crate) fn invalid(setting: &'static str, value: &str, reason: impl Into<String>) -> Self {
        SettingsError::InvalidValue {
            setting,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for SettingsError {
    fn from(err: config::ConfigError) -> Self {
        SettingsError::ConfigError(err.to_string())
    }
}

/// Errors raised while checking, planning or executing a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Invalid filter pattern `{pattern}`: {reason}")]
    InvalidFilter { pattern: String, reason: String },

    #[error("Report failed: {0}")]
    Report(String),
}
