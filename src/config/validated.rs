//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::settings::Field;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;
use super::WriteMode;

/// One requested change to a session setting.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    /// The setting to change
    pub field: Field,
    /// New value in wire form
    pub value: Value,
}

impl Edit {
    /// Creates an edit from a wire key and a wire value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownSetting`] if the key names no writable
    /// setting, or [`ConfigError::InvalidValue`] if the value is not the
    /// JSON kind the setting expects.
    pub fn new(key: &str, value: Value) -> Result<Self, ConfigError> {
        Self::checked(key.trim().parse::<Field>()?, value)
    }

    /// Parses a `key=value` option.
    ///
    /// Directory settings take the text verbatim (a surrounding pair of
    /// JSON quotes is dropped). Every other value is read as a JSON literal
    /// when possible (`true`, `42`), otherwise as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the option has no `=`, the key is unknown, or
    /// the value does not fit the setting.
    pub fn parse(option: &str) -> Result<Self, ConfigError> {
        let (key, raw) = option
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidAssignment {
                value: option.to_string(),
            })?;

        let field = key.trim().parse::<Field>()?;
        let raw = raw.trim();
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(Value::String(text)) => Value::String(text),
            Ok(literal) if !field.is_text() => literal,
            _ => Value::String(raw.to_string()),
        };

        Self::checked(field, value)
    }

    fn checked(field: Field, value: Value) -> Result<Self, ConfigError> {
        if !field.accepts(&value) {
            return Err(ConfigError::InvalidValue {
                key: field.key(),
                value: value.to_string(),
            });
        }
        Ok(Self { field, value })
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Path to the JSON session payload (required)
    pub payload: PathBuf,

    /// Requested edits, in the order they are applied
    pub edits: Vec<Edit>,

    /// How edits are flushed
    pub mode: WriteMode,

    /// Pretty-print JSON output
    pub pretty: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ payload: {}, edits: {}, mode: {}, pretty: {} }}",
            self.payload.display(),
            self.edits.len(),
            self.mode,
            self.pretty,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payload path is missing
    /// - An edit is malformed or names an unknown setting
    /// - The write mode is invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let payload = Self::resolve_payload(cli, toml)?;
        let edits = Self::resolve_edits(cli, toml)?;
        let mode = Self::resolve_mode(cli, toml)?;

        // Merge pretty (true if either side sets it)
        let pretty = cli.pretty || toml.is_some_and(|t| t.output.pretty);

        Ok(Self {
            payload,
            edits,
            mode,
            pretty,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Returns true if there is anything to apply.
    #[must_use]
    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    fn resolve_payload(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        // CLI takes precedence
        if let Some(ref path) = cli.payload {
            return Ok(path.clone());
        }

        toml.and_then(|t| t.session.payload.as_ref().map(PathBuf::from))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::PAYLOAD,
                    "Pass a PAYLOAD path or set session.payload in config file",
                )
            })
    }

    fn resolve_edits(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Vec<Edit>, ConfigError> {
        // CLI edits replace TOML edits entirely
        if !cli.sets.is_empty() {
            return cli.sets.iter().map(|option| Edit::parse(option)).collect();
        }

        toml.map_or_else(
            || Ok(Vec::new()),
            |t| {
                t.apply
                    .set
                    .iter()
                    .map(|(key, value)| Edit::new(key, value.clone()))
                    .collect()
            },
        )
    }

    fn resolve_mode(cli: &Cli, toml: Option<&TomlConfig>) -> Result<WriteMode, ConfigError> {
        // Priority: CLI explicit > TOML > default
        if let Some(mode) = cli.mode {
            return Ok(mode.into());
        }

        toml.and_then(|t| t.apply.mode.as_deref())
            .map_or(Ok(defaults::WRITE_MODE), parse_write_mode)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_write_mode(s: &str) -> Result<WriteMode, ConfigError> {
    match s.to_lowercase().as_str() {
        "immediate" | "live" => Ok(WriteMode::Immediate),
        "deferred" | "batch" => Ok(WriteMode::Deferred),
        _ => Err(ConfigError::InvalidWriteMode {
            value: s.to_string(),
        }),
    }
}
