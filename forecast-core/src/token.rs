//! Enumerated wire tokens.
//!
//! Each enumeration maps a fixed set of string tokens to variants and keeps
//! anything else in an `Unknown` variant holding the raw token. Whether an
//! unknown token is accepted is decided by
//! [`UnknownTokenPolicy`](crate::UnknownTokenPolicy) at decode time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A closed set of wire tokens with an escape hatch for unrecognized ones.
pub trait Token: Sized {
    /// Human-readable name of the enumeration, used in error messages.
    const KIND: &'static str;

    /// Exact, case-sensitive match against the known tokens.
    fn from_token(raw: &str) -> Self;

    fn as_token(&self) -> &str;

    fn is_unknown(&self) -> bool;
}

macro_rules! wire_tokens {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $( $(#[$variant_meta:meta])* $variant:ident => $token:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$variant_meta])* $variant, )+
            /// A token this version does not recognize, kept verbatim.
            Unknown(String),
        }

        impl $name {
            /// Every recognized token, in declaration order.
            pub const TOKENS: &'static [&'static str] = &[$($token),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $token, )+
                    $name::Unknown(raw) => raw.as_str(),
                }
            }
        }

        impl Token for $name {
            const KIND: &'static str = $kind;

            fn from_token(raw: &str) -> Self {
                match raw {
                    $( $token => $name::$variant, )+
                    other => $name::Unknown(other.to_string()),
                }
            }

            fn as_token(&self) -> &str {
                self.as_str()
            }

            fn is_unknown(&self) -> bool {
                matches!(self, $name::Unknown(_))
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                <$name as Token>::from_token(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(<$name as Token>::from_token(&raw))
            }
        }
    };
}

wire_tokens! {
    /// Machine-readable summary of a data point, suitable for picking an icon.
    pub enum Icon as "icon" {
        ClearDay => "clear-day",
        ClearNight => "clear-night",
        Rain => "rain",
        Snow => "snow",
        Sleet => "sleet",
        Wind => "wind",
        Fog => "fog",
        Cloudy => "cloudy",
        PartlyCloudyDay => "partly-cloudy-day",
        PartlyCloudyNight => "partly-cloudy-night",
        /// Reserved upstream, not currently sent.
        Hail => "hail",
        /// Reserved upstream, not currently sent.
        Thunderstorm => "thunderstorm",
        /// Reserved upstream, not currently sent.
        Tornado => "tornado",
    }
}

wire_tokens! {
    /// Type of precipitation occurring at a point in time.
    pub enum Precipitation as "precipitation type" {
        Rain => "rain",
        Snow => "snow",
        /// Also covers freezing rain, ice pellets and wintery mix.
        Sleet => "sleet",
    }
}

wire_tokens! {
    /// Measurement system every numeric field of a response is expressed in.
    #[derive(Default)]
    pub enum Units as "units" {
        /// Resolved upstream from the location; responses report the concrete system.
        Auto => "auto",
        /// SI, except wind speed and gust in kilometers per hour.
        Ca => "ca",
        /// SI, except distances in miles and wind speed in miles per hour.
        Uk2 => "uk2",
        /// Imperial units.
        #[default]
        Us => "us",
        Si => "si",
    }
}

wire_tokens! {
    /// Severity of a weather alert.
    pub enum Severity as "alert severity" {
        /// Be aware of potentially severe weather.
        Advisory => "advisory",
        /// Be prepared for severe weather.
        Watch => "watch",
        /// Take immediate action to protect life and property.
        Warning => "warning",
    }
}

impl Units {
    /// Temperature symbol for display, `None` when the system is not resolved.
    pub fn temperature_symbol(&self) -> Option<&'static str> {
        match self {
            Units::Us => Some("°F"),
            Units::Si | Units::Ca | Units::Uk2 => Some("°C"),
            Units::Auto | Units::Unknown(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_roundtrip() {
        for token in Icon::TOKENS {
            let icon = Icon::from_token(token);
            assert!(!icon.is_unknown(), "{token} should be recognized");
            assert_eq!(icon.as_token(), *token);
        }

        for token in Units::TOKENS {
            assert_eq!(Units::from(*token).to_string(), *token);
        }
    }

    #[test]
    fn unknown_token_keeps_raw_text() {
        let icon = Icon::from("smoke");

        assert!(icon.is_unknown());
        assert_eq!(icon, Icon::Unknown("smoke".to_string()));
        assert_eq!(icon.as_str(), "smoke");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(Units::from("US"), Units::Unknown("US".to_string()));
        assert_eq!(Units::from("us"), Units::Us);
    }

    #[test]
    fn enumerations_are_independent() {
        assert_eq!(Precipitation::from("rain"), Precipitation::Rain);
        assert_eq!(Icon::from("rain"), Icon::Rain);
        assert!(Precipitation::from("clear-day").is_unknown());
        assert!(Units::from("rain").is_unknown());
    }

    #[test]
    fn units_default_to_us() {
        assert_eq!(Units::default(), Units::Us);
        assert_eq!(Units::default().temperature_symbol(), Some("°F"));
        assert_eq!(Units::Auto.temperature_symbol(), None);
    }

    #[test]
    fn serde_uses_wire_tokens() {
        let json = serde_json::to_string(&Severity::Watch).unwrap();
        assert_eq!(json, "\"watch\"");

        let parsed: Precipitation = serde_json::from_str("\"hail\"").unwrap();
        assert_eq!(parsed, Precipitation::Unknown("hail".to_string()));
    }
}
