//! Session settings mirror for a remote torrent daemon.
//!
//! A library for keeping a strongly typed copy of a daemon's session
//! configuration in sync with the daemon's untyped key-value payload,
//! plus the configuration layer of the accompanying command-line tool.

pub mod config;
pub mod settings;
