//! Wire mapping and the record codec built on it.
//!
//! A [`WireMapping`] is a static table of the fields whose JSON key differs
//! from the internal field name. Every field not listed is identity-mapped,
//! and fields listed as excluded have no wire key at all. [`ObjectReader`] and
//! [`ObjectWriter`] resolve every field through the same table, which keeps
//! decode and encode symmetric.

use chrono::{DateTime, Utc};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::{
    error::DecodeError,
    options::{DecodeOptions, UnknownTokenPolicy},
    token::Token,
};

/// Key-alias table for one record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireMapping {
    record: &'static str,
    /// `(field, wire key)` pairs.
    aliases: &'static [(&'static str, &'static str)],
    /// Fields that never appear on the wire.
    excluded: &'static [&'static str],
}

impl WireMapping {
    pub const fn new(
        record: &'static str,
        aliases: &'static [(&'static str, &'static str)],
        excluded: &'static [&'static str],
    ) -> Self {
        Self {
            record,
            aliases,
            excluded,
        }
    }

    /// A mapping where every field is its own wire key.
    pub const fn identity(record: &'static str) -> Self {
        Self::new(record, &[], &[])
    }

    pub fn record(&self) -> &'static str {
        self.record
    }

    pub fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        self.aliases
    }

    /// Wire key for an internal field name, `None` if the field is excluded.
    pub fn wire_key<'a>(&self, field: &'a str) -> Option<&'a str> {
        if self.excluded.contains(&field) {
            return None;
        }

        let key = self
            .aliases
            .iter()
            .find(|(name, _)| *name == field)
            .map_or(field, |(_, wire)| *wire);

        Some(key)
    }

    /// Internal field name for a wire key.
    ///
    /// Returns `None` when the key belongs to an excluded field, or when it is
    /// the internal name of an aliased field (that name never appears on the
    /// wire).
    pub fn field_name<'a>(&self, wire: &'a str) -> Option<&'a str> {
        if let Some((field, _)) = self.aliases.iter().find(|(_, key)| *key == wire) {
            return Some(*field);
        }

        let shadowed = self.aliases.iter().any(|(field, _)| *field == wire);
        if shadowed || self.excluded.contains(&wire) {
            return None;
        }

        Some(wire)
    }
}

/// `DataPoint` aliases: every `precip*` wire key is spelled out internally.
pub const DATA_POINT: WireMapping = WireMapping::new(
    "DataPoint",
    &[
        ("precipitationType", "precipType"),
        ("precipitationIntensity", "precipIntensity"),
        ("precipitationIntensityError", "precipIntensityError"),
        ("precipitationIntensityMax", "precipIntensityMax"),
        ("precipitationIntensityMaxTime", "precipIntensityMaxTime"),
        ("precipitationProbability", "precipProbability"),
        ("precipitationAccumulation", "precipAccumulation"),
    ],
    &[],
);

/// `Flag` aliases. `feelsLike` is caller-side only.
pub const FLAG: WireMapping = WireMapping::new(
    "Flag",
    &[
        ("darkSkyUnavailable", "darksky-unavailable"),
        ("nearestStation", "nearest-station"),
    ],
    &["feelsLike"],
);

pub const DATA_BLOCK: WireMapping = WireMapping::identity("DataBlock");

pub const ALERT: WireMapping = WireMapping::identity("Alert");

pub const FORECAST: WireMapping = WireMapping::identity("Forecast");

/// A type that decodes from and encodes to one JSON object.
pub trait Record: Sized {
    const MAPPING: &'static WireMapping;

    fn read(reader: &ObjectReader<'_>) -> Result<Self, DecodeError>;

    fn write(&self, writer: &mut ObjectWriter);
}

/// Read-side view of one JSON object, addressed by internal field names.
#[derive(Debug)]
pub struct ObjectReader<'a> {
    object: &'a Map<String, Value>,
    mapping: &'static WireMapping,
    path: String,
    options: &'a DecodeOptions,
}

impl<'a> ObjectReader<'a> {
    fn new(
        value: &'a Value,
        mapping: &'static WireMapping,
        path: String,
        options: &'a DecodeOptions,
    ) -> Result<Self, DecodeError> {
        let Some(object) = value.as_object() else {
            return Err(DecodeError::UnexpectedShape {
                path,
                expected: "an object",
            });
        };

        Ok(Self {
            object,
            mapping,
            path,
            options,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// The value stored for `field` together with its path. Missing keys,
    /// `null` values and excluded fields all read as absent.
    fn raw(&self, field: &str) -> Option<(&'a Value, String)> {
        let key = self.mapping.wire_key(field)?;

        match self.object.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some((value, self.child_path(key))),
        }
    }

    fn missing(&self, field: &str) -> DecodeError {
        let key = self.mapping.wire_key(field).unwrap_or(field);
        DecodeError::MissingField {
            path: self.child_path(key),
        }
    }

    pub fn optional<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>, DecodeError> {
        let Some((value, path)) = self.raw(field) else {
            return Ok(None);
        };

        T::deserialize(value)
            .map(Some)
            .map_err(|source| DecodeError::InvalidField { path, source })
    }

    pub fn required<T: DeserializeOwned>(&self, field: &str) -> Result<T, DecodeError> {
        self.optional(field)?.ok_or_else(|| self.missing(field))
    }

    /// Reads a UNIX timestamp in seconds. Integers and reals are both
    /// accepted; a fractional part is kept as sub-second precision.
    pub fn time(&self, field: &str) -> Result<Option<DateTime<Utc>>, DecodeError> {
        let Some((value, path)) = self.raw(field) else {
            return Ok(None);
        };

        let seconds = match f64::deserialize(value) {
            Ok(seconds) => seconds,
            Err(source) => return Err(DecodeError::InvalidField { path, source }),
        };

        timestamp_from_seconds(seconds)
            .map(Some)
            .ok_or(DecodeError::TimestampOutOfRange { path, seconds })
    }

    pub fn required_time(&self, field: &str) -> Result<DateTime<Utc>, DecodeError> {
        self.time(field)?.ok_or_else(|| self.missing(field))
    }

    /// Reads an enumeration token, applying the unknown-token policy.
    pub fn token<T: Token>(&self, field: &str) -> Result<Option<T>, DecodeError> {
        let Some((value, path)) = self.raw(field) else {
            return Ok(None);
        };

        let raw = match String::deserialize(value) {
            Ok(raw) => raw,
            Err(source) => return Err(DecodeError::InvalidField { path, source }),
        };

        let token = T::from_token(&raw);
        if token.is_unknown() {
            match self.options.unknown_tokens {
                UnknownTokenPolicy::Reject => {
                    return Err(DecodeError::UnknownToken {
                        path,
                        kind: T::KIND,
                        token: raw,
                    });
                }
                UnknownTokenPolicy::Preserve => {
                    warn!(%path, kind = T::KIND, token = %raw, "preserving unrecognized token");
                }
            }
        }

        Ok(Some(token))
    }

    pub fn required_token<T: Token>(&self, field: &str) -> Result<T, DecodeError> {
        self.token(field)?.ok_or_else(|| self.missing(field))
    }

    /// Reads a nested record.
    pub fn record<T: Record>(&self, field: &str) -> Result<Option<T>, DecodeError> {
        let Some((value, path)) = self.raw(field) else {
            return Ok(None);
        };

        read_record(value, path, self.options).map(Some)
    }

    /// Reads a list of nested records. Element paths are indexed, e.g. `data[4]`.
    pub fn records<T: Record>(&self, field: &str) -> Result<Option<Vec<T>>, DecodeError> {
        let Some((value, path)) = self.raw(field) else {
            return Ok(None);
        };

        let Some(items) = value.as_array() else {
            return Err(DecodeError::UnexpectedShape {
                path,
                expected: "an array",
            });
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| read_record(item, format!("{path}[{index}]"), self.options))
            .collect::<Result<Vec<T>, _>>()
            .map(Some)
    }

    pub fn required_records<T: Record>(&self, field: &str) -> Result<Vec<T>, DecodeError> {
        self.records(field)?.ok_or_else(|| self.missing(field))
    }
}

/// Write-side counterpart of [`ObjectReader`]. Absent values are skipped.
#[derive(Debug)]
pub struct ObjectWriter {
    mapping: &'static WireMapping,
    object: Map<String, Value>,
}

impl ObjectWriter {
    fn new(mapping: &'static WireMapping) -> Self {
        Self {
            mapping,
            object: Map::new(),
        }
    }

    fn put(&mut self, field: &str, value: Value) {
        if let Some(key) = self.mapping.wire_key(field) {
            self.object.insert(key.to_string(), value);
        }
    }

    /// Non-finite numbers are written as `null`, which reads back as absent.
    pub fn number(&mut self, field: &str, value: Option<f64>) {
        if let Some(value) = value {
            self.put(field, Value::from(value));
        }
    }

    pub fn string(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.put(field, Value::from(value));
        }
    }

    pub fn strings(&mut self, field: &str, values: &[String]) {
        self.put(field, Value::from(values.to_vec()));
    }

    /// Whole-second times are written as integers, others as reals.
    pub fn time(&mut self, field: &str, value: Option<&DateTime<Utc>>) {
        if let Some(value) = value {
            self.put(field, seconds_from_timestamp(value));
        }
    }

    pub fn token<T: Token>(&mut self, field: &str, value: Option<&T>) {
        if let Some(value) = value {
            self.put(field, Value::from(value.as_token()));
        }
    }

    pub fn record<T: Record>(&mut self, field: &str, value: Option<&T>) {
        if let Some(value) = value {
            self.put(field, write_record(value));
        }
    }

    pub fn records<T: Record>(&mut self, field: &str, values: Option<&[T]>) {
        if let Some(values) = values {
            self.put(field, values.iter().map(write_record).collect());
        }
    }

    fn finish(self) -> Value {
        Value::Object(self.object)
    }
}

fn timestamp_from_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() || seconds < i64::MIN as f64 || seconds >= i64::MAX as f64 {
        return None;
    }

    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round() as u32;
    if nanos >= 1_000_000_000 {
        DateTime::from_timestamp(whole as i64 + 1, 0)
    } else {
        DateTime::from_timestamp(whole as i64, nanos)
    }
}

fn seconds_from_timestamp(time: &DateTime<Utc>) -> Value {
    match time.timestamp_subsec_nanos() {
        0 => Value::from(time.timestamp()),
        nanos => Value::from(time.timestamp() as f64 + f64::from(nanos) / 1e9),
    }
}

pub(crate) fn read_record<T: Record>(
    value: &Value,
    path: String,
    options: &DecodeOptions,
) -> Result<T, DecodeError> {
    let reader = ObjectReader::new(value, T::MAPPING, path, options)?;
    let record = T::read(&reader)?;
    trace!(record = T::MAPPING.record(), path = reader.path(), "decoded record");
    Ok(record)
}

pub(crate) fn write_record<T: Record>(record: &T) -> Value {
    let mut writer = ObjectWriter::new(T::MAPPING);
    record.write(&mut writer);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliased_fields_use_their_wire_key() {
        assert_eq!(DATA_POINT.wire_key("precipitationType"), Some("precipType"));
        assert_eq!(
            DATA_POINT.wire_key("precipitationIntensityMaxTime"),
            Some("precipIntensityMaxTime")
        );
        assert_eq!(FLAG.wire_key("darkSkyUnavailable"), Some("darksky-unavailable"));
        assert_eq!(FLAG.wire_key("nearestStation"), Some("nearest-station"));
    }

    #[test]
    fn unlisted_fields_are_identity_mapped() {
        assert_eq!(DATA_POINT.wire_key("windBearing"), Some("windBearing"));
        assert_eq!(
            DATA_POINT.wire_key("apparentTemperatureMinTime"),
            Some("apparentTemperatureMinTime")
        );
        assert_eq!(FLAG.wire_key("sources"), Some("sources"));
        assert_eq!(FLAG.wire_key("units"), Some("units"));
    }

    #[test]
    fn excluded_field_has_no_wire_key() {
        assert_eq!(FLAG.wire_key("feelsLike"), None);
        assert_eq!(FLAG.field_name("feelsLike"), None);
    }

    #[test]
    fn field_name_inverts_wire_key() {
        for (field, wire) in DATA_POINT.aliases() {
            assert_eq!(DATA_POINT.field_name(wire), Some(*field));
        }

        assert_eq!(DATA_POINT.field_name("humidity"), Some("humidity"));
        assert_eq!(FLAG.field_name("nearest-station"), Some("nearestStation"));
    }

    #[test]
    fn string_lists_are_always_written() {
        let mut writer = ObjectWriter::new(&FLAG);
        writer.strings("sources", &[]);
        writer.strings("feelsLike", &["ignored".to_string()]);

        assert_eq!(writer.finish(), serde_json::json!({"sources": []}));
    }

    #[test]
    fn timestamps_accept_integral_reals() {
        let expected = DateTime::from_timestamp(1_600_000_000, 0);

        assert_eq!(timestamp_from_seconds(1_600_000_000.0), expected);
        assert_eq!(timestamp_from_seconds(1.6e9), expected);
        assert_eq!(seconds_from_timestamp(&expected.unwrap()), Value::from(1_600_000_000_i64));
    }

    #[test]
    fn fractional_seconds_become_subsecond_precision() {
        let time = timestamp_from_seconds(1_600_000_000.25).unwrap();

        assert_eq!(time.timestamp(), 1_600_000_000);
        assert_eq!(time.timestamp_subsec_millis(), 250);
        assert_eq!(seconds_from_timestamp(&time), Value::from(1_600_000_000.25));
    }

    #[test]
    fn negative_fractions_round_down_to_the_earlier_second() {
        let time = timestamp_from_seconds(-0.5).unwrap();

        assert_eq!(time.timestamp(), -1);
        assert_eq!(time.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn timestamps_outside_the_date_range_are_rejected() {
        assert_eq!(timestamp_from_seconds(1e300), None);
        assert_eq!(timestamp_from_seconds(f64::NAN), None);
        assert_eq!(timestamp_from_seconds(-1e18), None);
    }

    #[test]
    fn internal_name_of_aliased_field_is_not_a_wire_key() {
        assert_eq!(DATA_POINT.field_name("precipitationProbability"), None);
        assert_eq!(FLAG.field_name("darkSkyUnavailable"), None);
    }
}
