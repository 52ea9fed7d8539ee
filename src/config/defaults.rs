//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use super::WriteMode;

/// Default write mode for edits.
pub const WRITE_MODE: WriteMode = WriteMode::Deferred;

/// Default output path of the `init` subcommand.
pub const CONFIG_FILE: &str = "session-settings.toml";
