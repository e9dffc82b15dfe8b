//! Decode and encode entry points.
//!
//! Decoding first parses the whole input, then walks it record by record;
//! any failure discards the partially built value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::DecodeError,
    model::{Alert, DataBlock, DataPoint, Flag, Forecast},
    options::DecodeOptions,
    wire::{self, Record},
};

pub fn from_slice<T: Record>(bytes: &[u8]) -> Result<T, DecodeError> {
    from_slice_with(bytes, &DecodeOptions::default())
}

pub fn from_slice_with<T: Record>(bytes: &[u8], options: &DecodeOptions) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    from_value_with(&value, options)
}

pub fn from_str<T: Record>(json: &str) -> Result<T, DecodeError> {
    from_str_with(json, &DecodeOptions::default())
}

pub fn from_str_with<T: Record>(json: &str, options: &DecodeOptions) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_str(json)?;
    from_value_with(&value, options)
}

pub fn from_value<T: Record>(value: &Value) -> Result<T, DecodeError> {
    from_value_with(value, &DecodeOptions::default())
}

pub fn from_value_with<T: Record>(
    value: &Value,
    options: &DecodeOptions,
) -> Result<T, DecodeError> {
    let record = wire::read_record(value, String::new(), options)?;
    debug!(record = T::MAPPING.record(), policy = %options.unknown_tokens, "decoded payload");
    Ok(record)
}

pub fn to_value<T: Record>(record: &T) -> Value {
    wire::write_record(record)
}

pub fn to_string<T: Record>(record: &T) -> String {
    to_value(record).to_string()
}

pub fn to_string_pretty<T: Record>(record: &T) -> String {
    format!("{:#}", to_value(record))
}

pub fn to_vec<T: Record>(record: &T) -> Vec<u8> {
    to_string(record).into_bytes()
}

/// Lets records nest inside caller-defined serde types. Decoding uses the
/// default options.
macro_rules! serde_via_record {
    ($($record:ty),+ $(,)?) => {
        $(
            impl Serialize for $record {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    to_value(self).serialize(serializer)
                }
            }

            impl<'de> Deserialize<'de> for $record {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let value = Value::deserialize(deserializer)?;
                    from_value(&value).map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

serde_via_record!(DataPoint, Flag, DataBlock, Alert, Forecast);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Units;
    use serde_json::json;

    #[test]
    fn malformed_json_has_no_path() {
        let err = from_str::<DataPoint>("{\"time\": ").unwrap_err();

        assert!(matches!(err, DecodeError::Json(_)));
        assert_eq!(err.path(), None);
    }

    #[test]
    fn string_and_bytes_agree() {
        let json = r#"{"sources":["isd"],"units":"si","nearest-station":0.4}"#;

        let from_text: Flag = from_str(json).unwrap();
        let from_bytes: Flag = from_slice(json.as_bytes()).unwrap();

        assert_eq!(from_text, from_bytes);
        assert_eq!(from_text.units, Units::Si);
    }

    #[test]
    fn encoded_text_decodes_back() {
        let point = DataPoint {
            summary: Some("Light rain".to_string()),
            precipitation_probability: Some(0.65),
            ..DataPoint::default()
        };

        let decoded: DataPoint = from_slice(&to_vec(&point)).unwrap();
        assert_eq!(decoded, point);

        let pretty: DataPoint = from_str(&to_string_pretty(&point)).unwrap();
        assert_eq!(pretty, point);
    }

    #[derive(Debug, Deserialize, Serialize)]
    struct CachedEntry {
        fetched_at: i64,
        flags: Flag,
        currently: Option<DataPoint>,
    }

    #[test]
    fn records_nest_in_serde_types() {
        let entry: CachedEntry = serde_json::from_value(json!({
            "fetched_at": 1600000000,
            "flags": {"sources": ["isd"], "units": "ca"},
            "currently": {"precipIntensity": 0.02},
        }))
        .unwrap();

        assert_eq!(entry.flags.units, Units::Ca);
        assert_eq!(entry.currently.as_ref().and_then(|p| p.precipitation_intensity), Some(0.02));

        let encoded = serde_json::to_value(&entry).unwrap();
        assert_eq!(encoded["currently"], json!({"precipIntensity": 0.02}));
        assert!(encoded["flags"].get("feelsLike").is_none());
    }

    #[test]
    fn nested_serde_errors_mention_the_field() {
        let err = serde_json::from_value::<CachedEntry>(json!({
            "fetched_at": 1,
            "flags": {"sources": ["isd"]},
            "currently": null,
        }))
        .unwrap_err();

        assert!(err.to_string().contains("`units`"));
    }
}
