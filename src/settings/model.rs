//! The session settings model.

use serde_json::{Map, Value};

use super::fields::{Field, MINIMUM_RPC_VERSION_KEY, RPC_VERSION_KEY, SettingValues};
use super::rpc::SessionRpc;
use super::units::{UNITS_KEY, UnitSystem};

/// When a write-through setter actually reaches the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Store and push on every call, even if the value is unchanged.
    Always,
    /// Skip both the store and the push when the value is unchanged.
    IfChanged,
}

/// Stores `value` into `slot` according to `policy`.
///
/// Returns whether the setter should go on to push the field.
pub(super) fn assign<T: PartialEq>(slot: &mut T, value: T, policy: WritePolicy) -> bool {
    if policy == WritePolicy::IfChanged && *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Typed mirror of a daemon's session settings.
///
/// Holds the last decoded snapshot plus any local edits, and a collaborator
/// used to push edits upstream. Every setting has a getter and a setter
/// generated from the field registry; setters take a `write_through` flag:
///
/// - `true`: the field is encoded on its own and sent with
///   [`SessionRpc::set_session_property`] right away.
/// - `false`: the edit stays local until [`SessionSettings::save`].
///
/// The directory fields and the alt-speed day mask skip unchanged values;
/// every other setter pushes unconditionally.
///
/// The model is single-owner and does no locking.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use session_settings::settings::{SessionEntries, SessionRpc, SessionSettings};
///
/// struct Discard;
///
/// impl SessionRpc for Discard {
///     fn set_session_property(&self, _key: &str, _value: serde_json::Value) {}
///     fn set_session_properties(&self, _entries: SessionEntries) {}
/// }
///
/// let payload = json!({
///     "peer-port": 51413,
///     "dht-enabled": true,
///     "units": { "speed-bytes": 1000 },
///     "speed-limit-down": 100,
/// });
///
/// let mut settings = SessionSettings::new(Discard);
/// settings.decode(payload.as_object().unwrap());
///
/// assert_eq!(settings.peer_port(), 51413);
/// assert!(settings.dht_enabled());
/// assert_eq!(settings.download_speed_limit(), 97);
/// ```
#[derive(Debug)]
pub struct SessionSettings<R> {
    rpc: R,
    pub(super) values: SettingValues,
    populated: bool,
}

impl<R: SessionRpc> SessionSettings<R> {
    /// Creates a model with every setting at its zero-value.
    #[must_use]
    pub fn new(rpc: R) -> Self {
        Self {
            rpc,
            values: SettingValues::default(),
            populated: false,
        }
    }

    /// Replaces every setting with the contents of a session payload.
    ///
    /// The unit system is read first and applied to every speed limit.
    /// Missing keys and values of the wrong kind become zero-values.
    /// Nothing is pushed upstream.
    pub fn decode(&mut self, payload: &Map<String, Value>) {
        let units = UnitSystem::from_payload(payload);
        self.values = SettingValues::decode(payload, units);
        self.populated = true;

        tracing::debug!(
            rpc_version = self.values.rpc_version,
            decimal_units = units.is_decimal(),
            keys = payload.len(),
            "Decoded session settings"
        );
    }

    /// Encodes the full snapshot as a session payload.
    ///
    /// Includes the read-only protocol keys and the `units` map, so the
    /// result decodes back into the same snapshot.
    #[must_use]
    pub fn encode_all(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert(RPC_VERSION_KEY.to_owned(), Value::from(self.values.rpc_version));
        payload.insert(
            MINIMUM_RPC_VERSION_KEY.to_owned(),
            Value::from(self.values.minimum_rpc_version),
        );
        payload.insert(UNITS_KEY.to_owned(), self.values.units.to_units_value());
        for (key, value) in self.values.writable_entries() {
            payload.insert(key.to_owned(), value);
        }
        payload
    }

    /// Pushes every writable setting in one bulk request.
    pub fn save(&self) {
        let entries = self.values.writable_entries();
        tracing::debug!(count = entries.len(), "Saving session settings");
        self.rpc.set_session_properties(entries);
    }

    /// Encodes one field and sends it upstream.
    pub(super) fn push(&self, field: Field) {
        let value = self.values.encode_field(field);
        tracing::debug!(key = field.key(), %value, "Writing session property");
        self.rpc.set_session_property(field.key(), value);
    }

    /// Returns true once a payload has been decoded.
    #[must_use]
    pub const fn is_populated(&self) -> bool {
        self.populated
    }

    /// RPC protocol version reported by the daemon.
    #[must_use]
    pub const fn rpc_version(&self) -> i64 {
        self.values.rpc_version
    }

    /// Oldest RPC protocol version the daemon accepts.
    #[must_use]
    pub const fn minimum_rpc_version(&self) -> i64 {
        self.values.minimum_rpc_version
    }

    /// Unit system the daemon uses for speed limits.
    #[must_use]
    pub const fn units(&self) -> UnitSystem {
        self.values.units
    }

    /// Returns true if the daemon reports speeds in 1000-based units.
    #[must_use]
    pub const fn using_decimal_units(&self) -> bool {
        self.values.units.is_decimal()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub const fn values(&self) -> &SettingValues {
        &self.values
    }

    /// Returns the collaborator.
    #[must_use]
    pub const fn rpc(&self) -> &R {
        &self.rpc
    }

    /// Consumes the model, returning the collaborator.
    #[must_use]
    pub fn into_rpc(self) -> R {
        self.rpc
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
