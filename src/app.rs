//! Process plumbing for the binary: exit codes, hints and log setup.

use session_settings::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Exit codes reported by the binary.
pub mod exit_code {
    use std::process::ExitCode;

    /// Settings were printed or requests were previewed.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Bad arguments, config file or `--set` option (1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// The payload could not be read or the output could not be written (2).
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

const INIT_HINT: &str = "\nRun 'session-settings init' to generate a configuration template.";

/// Prints a follow-up hint for configuration errors a user can fix directly.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::PAYLOAD => {
            eprintln!("{INIT_HINT}");
        }
        ConfigError::FileRead { .. } => eprintln!("{INIT_HINT}"),
        ConfigError::UnknownSetting(_) => {
            eprintln!("\nSetting keys are the daemon's wire keys, e.g. 'peer-port' or 'download-dir'.");
        }
        ConfigError::InvalidValue { .. } => {
            eprintln!(
                "\nValues use the daemon's wire form: true/false for switches, integers for \
                 counts and speed limits, minutes after midnight for times, and \
                 tolerated/preferred/required for encryption."
            );
        }
        _ => {}
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` overrides the level chosen by `--verbose`.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
