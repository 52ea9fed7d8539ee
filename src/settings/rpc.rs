//! The outbound half of the daemon connection, as seen by the settings model.

use std::sync::Arc;

use serde_json::Value;

/// Ordered key-value pairs for a bulk write.
pub type SessionEntries = Vec<(&'static str, Value)>;

/// Sink for session property writes.
///
/// Both methods are fire-and-forget: delivery, ordering, error reporting
/// and retries belong to the implementation. The settings model never
/// inspects the outcome and never rolls back its in-memory state.
///
/// # Example
///
/// ```
/// use session_settings::settings::{SessionEntries, SessionRpc};
/// use serde_json::Value;
///
/// struct Discard;
///
/// impl SessionRpc for Discard {
///     fn set_session_property(&self, _key: &str, _value: Value) {}
///     fn set_session_properties(&self, _entries: SessionEntries) {}
/// }
/// ```
pub trait SessionRpc {
    /// Pushes a single session property.
    fn set_session_property(&self, key: &str, value: Value);

    /// Pushes several session properties in one request, in order.
    fn set_session_properties(&self, entries: SessionEntries);
}

impl<T: SessionRpc + ?Sized> SessionRpc for &T {
    fn set_session_property(&self, key: &str, value: Value) {
        (**self).set_session_property(key, value);
    }

    fn set_session_properties(&self, entries: SessionEntries) {
        (**self).set_session_properties(entries);
    }
}

impl<T: SessionRpc + ?Sized> SessionRpc for Box<T> {
    fn set_session_property(&self, key: &str, value: Value) {
        (**self).set_session_property(key, value);
    }

    fn set_session_properties(&self, entries: SessionEntries) {
        (**self).set_session_properties(entries);
    }
}

impl<T: SessionRpc + ?Sized> SessionRpc for Arc<T> {
    fn set_session_property(&self, key: &str, value: Value) {
        (**self).set_session_property(key, value);
    }

    fn set_session_properties(&self, entries: SessionEntries) {
        (**self).set_session_properties(entries);
    }
}
