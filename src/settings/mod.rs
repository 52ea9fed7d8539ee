//! Typed mirror of a remote daemon's session settings.
//!
//! This module provides:
//! - The settings model ([`SessionSettings`]) with typed getters and setters
//! - The field registry ([`Field`], [`SettingValues`]) that drives decode and encode
//! - The outbound collaborator interface ([`SessionRpc`])
//! - Value types for units, encryption and the alternative speed schedule
//!
//! # Wire format
//!
//! The daemon describes its session as a flat JSON object keyed by
//! setting name, plus one nested map `"units": { "speed-bytes": n }`.
//! Speed limits are in the unit announced there (`1000` means kilobytes,
//! anything else kibibytes); times are minutes since midnight; encryption
//! is one of `"tolerated"`, `"preferred"` or `"required"`.
//!
//! # Write modes
//!
//! Setters either push the single edited key immediately (write-through)
//! or only update the snapshot, leaving a later [`SessionSettings::save`]
//! to push every writable key at once.

mod codec;
mod encryption;
mod error;
mod fields;
mod model;
mod rpc;
mod schedule;
mod units;

pub use codec::{Codec, Count, Days, Encryption, Flag, Minutes, Ratio, Speed, Text};
pub use encryption::EncryptionMode;
pub use error::FieldError;
pub use fields::{Field, MINIMUM_RPC_VERSION_KEY, RPC_VERSION_KEY, SettingValues};
pub use model::{SessionSettings, WritePolicy};
#[cfg(test)]
pub use rpc::mock;
pub use rpc::{SessionEntries, SessionRpc};
pub use schedule::{AltSpeedDays, minutes_from_time, time_from_minutes};
pub use units::{SPEED_BYTES_KEY, UNITS_KEY, UnitSystem, to_local_unit, to_wire_unit};
