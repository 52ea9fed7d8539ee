//! Bandwidth unit handling.
//!
//! The daemon reports speed limits in either decimal kilobytes (1000 bytes)
//! or binary kibibytes (1024 bytes), as declared by `units.speed-bytes` in
//! the session payload. The model always stores kibibytes.

use serde_json::Value;

/// Wire key of the nested units map.
pub const UNITS_KEY: &str = "units";

/// Key inside the units map that holds the byte multiplier.
pub const SPEED_BYTES_KEY: &str = "speed-bytes";

/// Unit system the daemon uses for speed limits on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    /// 1000-based kilobytes.
    Decimal,
    /// 1024-based kibibytes. Also the fallback for anything unrecognized.
    #[default]
    Binary,
}

impl UnitSystem {
    /// Maps a `speed-bytes` value to a unit system.
    ///
    /// Only `1000` selects decimal units.
    #[must_use]
    pub const fn from_speed_bytes(speed_bytes: i64) -> Self {
        if speed_bytes == 1000 {
            Self::Decimal
        } else {
            Self::Binary
        }
    }

    /// Returns the `speed-bytes` multiplier for this unit system.
    #[must_use]
    pub const fn speed_bytes(self) -> i64 {
        match self {
            Self::Decimal => 1000,
            Self::Binary => 1024,
        }
    }

    /// Reads the unit system from a session payload.
    ///
    /// A missing or malformed `units` map yields [`UnitSystem::Binary`].
    #[must_use]
    pub fn from_payload(payload: &serde_json::Map<String, Value>) -> Self {
        let speed_bytes = payload
            .get(UNITS_KEY)
            .and_then(Value::as_object)
            .and_then(|units| units.get(SPEED_BYTES_KEY))
            .and_then(Value::as_i64)
            .unwrap_or_default();

        Self::from_speed_bytes(speed_bytes)
    }

    /// Builds the nested `units` map for an encoded payload.
    #[must_use]
    pub fn to_units_value(self) -> Value {
        let mut units = serde_json::Map::new();
        units.insert(SPEED_BYTES_KEY.to_owned(), Value::from(self.speed_bytes()));
        Value::Object(units)
    }

    /// Returns true for 1000-based units.
    #[must_use]
    pub const fn is_decimal(self) -> bool {
        matches!(self, Self::Decimal)
    }
}

/// Converts a wire speed value into kibibytes.
///
/// Decimal values are scaled by 1000/1024 with truncating division.
/// Binary values pass through unchanged.
#[must_use]
pub const fn to_local_unit(wire: i64, units: UnitSystem) -> i64 {
    match units {
        UnitSystem::Decimal => wire.saturating_mul(1000) / 1024,
        UnitSystem::Binary => wire,
    }
}

/// Converts kibibytes into the daemon's wire unit.
///
/// Inverse of [`to_local_unit`]; decimal conversion truncates, so a decimal
/// round trip may come back slightly below the original wire value.
#[must_use]
pub const fn to_wire_unit(local: i64, units: UnitSystem) -> i64 {
    match units {
        UnitSystem::Decimal => local.saturating_mul(1024) / 1000,
        UnitSystem::Binary => local,
    }
}
