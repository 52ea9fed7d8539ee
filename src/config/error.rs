//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::settings::FieldError;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// A `--set` option is not in `key=value` form.
    #[error("Invalid setting '{value}': expected 'key=value'")]
    InvalidAssignment {
        /// The invalid option string
        value: String,
    },

    /// A setting value does not have the JSON kind its field expects.
    #[error("Invalid value {value} for setting '{key}'")]
    InvalidValue {
        /// Wire key of the setting
        key: &'static str,
        /// The rejected value, as JSON
        value: String,
    },

    /// A setting key names no writable session setting.
    #[error(transparent)]
    UnknownSetting(#[from] FieldError),

    /// Invalid write mode value.
    #[error("Invalid write mode '{value}': expected immediate or deferred")]
    InvalidWriteMode {
        /// The invalid value provided
        value: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The session payload path field.
    pub const PAYLOAD: &str = "payload";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
