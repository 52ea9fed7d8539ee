//! Per-kind conversion between wire values and typed settings.
//!
//! Reading is permissive: a missing key or a value of the wrong JSON kind
//! yields the kind's zero-value instead of an error, because the daemon's
//! schema may evolve independently of this crate.

use chrono::NaiveTime;
use serde_json::Value;

use super::encryption::EncryptionMode;
use super::schedule::{
    AltSpeedDays, is_minute_of_day, minutes_from_time, time_from_minutes, truncate_to_minute,
};
use super::units::{UnitSystem, to_local_unit, to_wire_unit};

/// Conversion rules for one kind of setting.
///
/// `units` is passed explicitly to every call; only [`Speed`] looks at it.
pub trait Codec {
    /// In-memory representation.
    type Value: Clone + PartialEq + Default + std::fmt::Debug;

    /// What a getter hands out.
    type View<'a>
    where
        Self::Value: 'a;

    /// Decodes a wire value. `None` means the key was absent.
    fn decode(raw: Option<&Value>, units: UnitSystem) -> Self::Value;

    /// Encodes an in-memory value for the wire.
    fn encode(value: &Self::Value, units: UnitSystem) -> Value;

    /// Borrows the in-memory value for a getter.
    fn view(value: &Self::Value) -> Self::View<'_>;

    /// Whether values are free-form text rather than a JSON literal.
    const FREE_TEXT: bool = false;

    /// Whether `raw` is exactly the wire kind this codec expects.
    ///
    /// Decoding never rejects anything; this is for vetting values a user
    /// supplies before they are sent.
    fn accepts(raw: &Value) -> bool;

    /// Brings a caller-supplied value into its representable form.
    fn normalize(value: Self::Value) -> Self::Value {
        value
    }
}

/// Reads an integer, truncating fractional numbers.
pub(crate) fn read_i64(raw: Option<&Value>) -> i64 {
    match raw {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| {
            // u64 beyond i64::MAX, or a float
            n.as_f64()
                .filter(|f| f.is_finite())
                .map_or(0, |f| f as i64)
        }),
        _ => 0,
    }
}

fn is_integer(raw: &Value) -> bool {
    raw.as_i64().is_some()
}

fn read_f64(raw: Option<&Value>) -> f64 {
    raw.and_then(Value::as_f64).unwrap_or_default()
}

fn read_bool(raw: Option<&Value>) -> bool {
    raw.and_then(Value::as_bool).unwrap_or_default()
}

fn read_str(raw: Option<&Value>) -> &str {
    raw.and_then(Value::as_str).unwrap_or_default()
}

/// Boolean switch.
#[derive(Debug)]
pub enum Flag {}

impl Codec for Flag {
    type Value = bool;
    type View<'a> = bool;

    fn decode(raw: Option<&Value>, _units: UnitSystem) -> bool {
        read_bool(raw)
    }

    fn encode(value: &bool, _units: UnitSystem) -> Value {
        Value::Bool(*value)
    }

    fn view(value: &bool) -> bool {
        *value
    }

    fn accepts(raw: &Value) -> bool {
        raw.is_boolean()
    }
}

/// Plain integer: counts, sizes, ports, minutes.
#[derive(Debug)]
pub enum Count {}

impl Codec for Count {
    type Value = i64;
    type View<'a> = i64;

    fn decode(raw: Option<&Value>, _units: UnitSystem) -> i64 {
        read_i64(raw)
    }

    fn encode(value: &i64, _units: UnitSystem) -> Value {
        Value::from(*value)
    }

    fn view(value: &i64) -> i64 {
        *value
    }

    fn accepts(raw: &Value) -> bool {
        is_integer(raw)
    }
}

/// Fractional number such as a seed ratio.
#[derive(Debug)]
pub enum Ratio {}

impl Codec for Ratio {
    type Value = f64;
    type View<'a> = f64;

    fn decode(raw: Option<&Value>, _units: UnitSystem) -> f64 {
        read_f64(raw)
    }

    fn encode(value: &f64, _units: UnitSystem) -> Value {
        // NaN and infinities have no JSON form
        serde_json::Number::from_f64(*value).map_or(Value::from(0.0), Value::Number)
    }

    fn view(value: &f64) -> f64 {
        *value
    }

    fn accepts(raw: &Value) -> bool {
        raw.is_number()
    }
}

/// Free-form string such as a directory path.
#[derive(Debug)]
pub enum Text {}

impl Codec for Text {
    type Value = String;
    type View<'a> = &'a str;

    const FREE_TEXT: bool = true;

    fn decode(raw: Option<&Value>, _units: UnitSystem) -> String {
        read_str(raw).to_owned()
    }

    fn encode(value: &String, _units: UnitSystem) -> Value {
        Value::String(value.clone())
    }

    fn view(value: &String) -> &str {
        value
    }

    fn accepts(raw: &Value) -> bool {
        raw.is_string()
    }
}

/// Speed limit, stored in KiB/s and sent in the daemon's unit.
#[derive(Debug)]
pub enum Speed {}

impl Codec for Speed {
    type Value = i64;
    type View<'a> = i64;

    fn decode(raw: Option<&Value>, units: UnitSystem) -> i64 {
        to_local_unit(read_i64(raw), units)
    }

    fn encode(value: &i64, units: UnitSystem) -> Value {
        Value::from(to_wire_unit(*value, units))
    }

    fn view(value: &i64) -> i64 {
        *value
    }

    fn accepts(raw: &Value) -> bool {
        is_integer(raw)
    }
}

/// Time of day, sent as minutes since midnight.
#[derive(Debug)]
pub enum Minutes {}

impl Codec for Minutes {
    type Value = NaiveTime;
    type View<'a> = NaiveTime;

    fn decode(raw: Option<&Value>, _units: UnitSystem) -> NaiveTime {
        time_from_minutes(read_i64(raw))
    }

    fn encode(value: &NaiveTime, _units: UnitSystem) -> Value {
        Value::from(minutes_from_time(*value))
    }

    fn view(value: &NaiveTime) -> NaiveTime {
        *value
    }

    fn accepts(raw: &Value) -> bool {
        raw.as_i64().is_some_and(is_minute_of_day)
    }

    fn normalize(value: NaiveTime) -> NaiveTime {
        truncate_to_minute(value)
    }
}

/// Day-of-week bitmask, kept verbatim.
#[derive(Debug)]
pub enum Days {}

impl Codec for Days {
    type Value = AltSpeedDays;
    type View<'a> = AltSpeedDays;

    fn decode(raw: Option<&Value>, _units: UnitSystem) -> AltSpeedDays {
        AltSpeedDays::from_bits(read_i64(raw))
    }

    fn encode(value: &AltSpeedDays, _units: UnitSystem) -> Value {
        Value::from(value.bits())
    }

    fn view(value: &AltSpeedDays) -> AltSpeedDays {
        *value
    }

    fn accepts(raw: &Value) -> bool {
        is_integer(raw)
    }
}

/// Encryption policy string.
#[derive(Debug)]
pub enum Encryption {}

impl Codec for Encryption {
    type Value = EncryptionMode;
    type View<'a> = EncryptionMode;

    fn decode(raw: Option<&Value>, _units: UnitSystem) -> EncryptionMode {
        EncryptionMode::from_wire(read_str(raw))
    }

    fn encode(value: &EncryptionMode, _units: UnitSystem) -> Value {
        Value::from(value.as_wire())
    }

    fn view(value: &EncryptionMode) -> EncryptionMode {
        *value
    }

    fn accepts(raw: &Value) -> bool {
        raw.as_str().and_then(EncryptionMode::parse_wire).is_some()
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
