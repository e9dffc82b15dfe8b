use std::fmt;

/// Reporting cadence a [`DataPoint`](crate::DataPoint) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Granularity {
    Currently,
    Minutely,
    Hourly,
    Daily,
}

const CURRENTLY_ONLY: &[&str] = &["nearestStormDistance", "nearestStormBearing"];

const DAILY_ONLY: &[&str] = &[
    "sunriseTime",
    "sunsetTime",
    "moonPhase",
    "precipitationIntensityMax",
    "precipitationIntensityMaxTime",
    "temperatureLow",
    "temperatureLowTime",
    "temperatureHigh",
    "temperatureHighTime",
    "temperatureMax",
    "temperatureMaxTime",
    "temperatureMin",
    "temperatureMinTime",
    "apparentTemperatureLow",
    "apparentTemperatureLowTime",
    "apparentTemperatureHigh",
    "apparentTemperatureHighTime",
    "apparentTemperatureMax",
    "apparentTemperatureMaxTime",
    "apparentTemperatureMin",
    "apparentTemperatureMinTime",
    "windGustTime",
    "uvIndexTime",
];

impl Granularity {
    /// Key of the response block holding points of this granularity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Currently => "currently",
            Granularity::Minutely => "minutely",
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
        }
    }

    pub const fn all() -> &'static [Granularity] {
        &[
            Granularity::Currently,
            Granularity::Minutely,
            Granularity::Hourly,
            Granularity::Daily,
        ]
    }

    /// Whether a point of this granularity can carry `field` (internal name).
    /// Fields with no documented restriction are defined everywhere.
    pub fn defines(&self, field: &str) -> bool {
        if CURRENTLY_ONLY.contains(&field) {
            return *self == Granularity::Currently;
        }
        if DAILY_ONLY.contains(&field) {
            return *self == Granularity::Daily;
        }

        match field {
            "precipitationAccumulation" => matches!(self, Granularity::Hourly | Granularity::Daily),
            "temperature" => *self != Granularity::Minutely,
            "apparentTemperature" => *self != Granularity::Daily,
            _ => true,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
