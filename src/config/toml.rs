//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Payload input configuration
    #[serde(default)]
    pub session: SessionSection,

    /// Edit configuration
    #[serde(default)]
    pub apply: ApplySection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Payload input section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    /// Path to the JSON session payload
    pub payload: Option<String>,
}

/// Edit configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplySection {
    /// Write mode: "immediate" or "deferred"
    pub mode: Option<String>,

    /// Settings to change, keyed by wire key, with wire values
    #[serde(default)]
    pub set: BTreeMap<String, serde_json::Value>,
}

/// Output configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# session-settings configuration file

[session]
# JSON session settings payload, as returned by the daemon (required)
# Can be overridden by the positional PAYLOAD argument
# payload = "session.json"

[apply]
# How edits reach the daemon (default: deferred)
# "immediate": one property write per edit, unchanged directories are skipped
# "deferred":  edits stay local, then every setting is pushed in one request
# mode = "deferred"

# Settings to change, keyed by wire key
# Speed limits are given in the daemon's unit (see units.speed-bytes)
# Note: CLI --set options REPLACE these entirely (not merged)
# [apply.set]
# "peer-port" = 51413
# "dht-enabled" = true
# "encryption" = "preferred"
# "alt-speed-time-begin" = 540

[output]
# Pretty-print JSON output
# pretty = false
"#
    .to_string()
}
