//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::{WriteMode, defaults};

/// Session settings inspector
///
/// Decodes a daemon's session settings payload into typed values, applies
/// edits, and prints the session property writes they produce.
#[derive(Debug, Parser)]
#[command(name = "session-settings")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a JSON session settings payload (required for run mode)
    pub payload: Option<PathBuf>,

    /// Setting to change, as 'key=value' with a wire key (can be specified multiple times)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub sets: Vec<String>,

    /// How edits reach the daemon
    #[arg(long, value_enum)]
    pub mode: Option<WriteModeArg>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for session-settings
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

/// Write mode argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WriteModeArg {
    /// Push each edit on its own as it is applied
    #[value(name = "immediate")]
    Immediate,
    /// Apply every edit locally, then push all settings in one request
    #[value(name = "deferred")]
    Deferred,
}

impl From<WriteModeArg> for WriteMode {
    fn from(arg: WriteModeArg) -> Self {
        match arg {
            WriteModeArg::Immediate => Self::Immediate,
            WriteModeArg::Deferred => Self::Deferred,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
