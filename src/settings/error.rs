//! Error types for the settings layer.
//!
//! Decoding and encoding never fail; only name-based lookups can.

use thiserror::Error;

/// Error type for resolving settings by wire key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The key names no writable session setting.
    #[error("Unknown session setting '{0}'")]
    UnknownKey(String),
}
