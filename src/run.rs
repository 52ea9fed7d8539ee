//! Application execution logic.
//!
//! Decodes a session payload, applies the configured edits and writes the
//! resulting session property requests to the output.

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use thiserror::Error;

use session_settings::config::{ValidatedConfig, WriteMode};
use session_settings::settings::{SessionEntries, SessionRpc, SessionSettings};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// RPC method name the daemon uses for session property writes.
const SESSION_SET: &str = "session-set";

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to read the payload file.
    #[error("Failed to read payload '{}': {source}", path.display())]
    PayloadRead {
        /// Path to the payload file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The payload file is not valid JSON.
    #[error("Failed to parse payload '{}': {source}", path.display())]
    PayloadParse {
        /// Path to the payload file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The payload is valid JSON but not an object.
    #[error("Payload '{}' is not a JSON object", path.display())]
    PayloadNotObject {
        /// Path to the payload file
        path: PathBuf,
    },

    /// Failed to write output.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Collaborator that records every write as a `session-set` request body.
///
/// Nothing is sent anywhere; the requests are printed instead.
#[derive(Debug, Default)]
pub struct RequestLog {
    requests: RefCell<Vec<Value>>,
}

impl RequestLog {
    /// Returns the recorded requests, oldest first.
    pub fn into_requests(self) -> Vec<Value> {
        self.requests.into_inner()
    }

    fn record(&self, arguments: Map<String, Value>) {
        tracing::debug!(keys = arguments.len(), "Recorded {SESSION_SET} request");
        self.requests.borrow_mut().push(json!({
            "method": SESSION_SET,
            "arguments": arguments,
        }));
    }
}

impl SessionRpc for RequestLog {
    fn set_session_property(&self, key: &str, value: Value) {
        let mut arguments = Map::new();
        arguments.insert(key.to_owned(), value);
        self.record(arguments);
    }

    fn set_session_properties(&self, entries: SessionEntries) {
        let arguments = entries
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect();
        self.record(arguments);
    }
}

/// Executes the application.
///
/// Without edits, prints every decoded setting. With edits, applies them
/// in order and prints the requests they produce: one per edit in
/// immediate mode, a single bulk request in deferred mode.
///
/// # Errors
///
/// Returns an error if the payload cannot be read or parsed, or if the
/// output cannot be written.
pub fn execute(config: &ValidatedConfig, out: &mut impl Write) -> Result<(), RunError> {
    let payload = load_payload(&config.payload)?;

    let mut settings = SessionSettings::new(RequestLog::default());
    settings.decode(&payload);

    tracing::info!(
        "Loaded session settings (rpc-version {}, {} units)",
        settings.rpc_version(),
        if settings.using_decimal_units() { "decimal" } else { "binary" }
    );

    if !config.has_edits() {
        return print_settings(&settings, out);
    }

    let write_through = config.mode.is_immediate();
    for edit in &config.edits {
        tracing::debug!(key = edit.field.key(), value = %edit.value, "Applying edit");
        settings.apply_wire_value(edit.field, &edit.value, write_through);
    }

    if config.mode == WriteMode::Deferred {
        settings.save();
    }

    let requests = settings.into_rpc().into_requests();
    tracing::info!(
        "{} edit(s) produced {} request(s) in {} mode",
        config.edits.len(),
        requests.len(),
        config.mode
    );

    print_requests(&requests, config.pretty, out)
}

/// Reads and parses a payload file into a JSON object.
fn load_payload(path: &Path) -> Result<Map<String, Value>, RunError> {
    let content = std::fs::read_to_string(path).map_err(|e| RunError::PayloadRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| RunError::PayloadParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Some clients save the whole RPC response rather than its arguments
    let value = match value {
        Value::Object(mut response) if response.contains_key("arguments") => {
            response.remove("arguments").unwrap_or_default()
        }
        other => other,
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(RunError::PayloadNotObject {
            path: path.to_path_buf(),
        }),
    }
}

fn print_settings(
    settings: &SessionSettings<RequestLog>,
    out: &mut impl Write,
) -> Result<(), RunError> {
    writeln!(out, "rpc-version = {}", settings.rpc_version())?;
    writeln!(out, "rpc-version-minimum = {}", settings.minimum_rpc_version())?;
    writeln!(out, "units.speed-bytes = {}", settings.units().speed_bytes())?;
    for (key, value) in settings.values().describe() {
        writeln!(out, "{key} = {value}")?;
    }
    Ok(())
}

fn print_requests(requests: &[Value], pretty: bool, out: &mut impl Write) -> Result<(), RunError> {
    for request in requests {
        if pretty {
            serde_json::to_writer_pretty(&mut *out, request).map_err(io::Error::from)?;
        } else {
            serde_json::to_writer(&mut *out, request).map_err(io::Error::from)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
