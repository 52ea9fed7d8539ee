//! Configuration layer for the session-settings tool.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The payload path has no default; CLI takes precedence over TOML.
//!
//! Edits (`--set` / `[apply.set]`) use replace semantics: if any `--set` is
//! given on the command line, the TOML edits are ignored entirely.
//!
//! # Boolean Flag Semantics
//!
//! `--pretty` uses OR semantics: if set `true` in either CLI or TOML, the
//! result is `true`.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


use std::fmt;

pub use cli::{Cli, Command, WriteModeArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{Edit, ValidatedConfig, write_default_config};

/// How edits are flushed to the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Every edit is pushed on its own, through the write-through setters.
    Immediate,
    /// Edits are buffered, then all settings are saved in one bulk write.
    Deferred,
}

impl WriteMode {
    /// Returns true if setters should write through.
    #[must_use]
    pub const fn is_immediate(self) -> bool {
        matches!(self, Self::Immediate)
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::Deferred => write!(f, "deferred"),
        }
    }
}
