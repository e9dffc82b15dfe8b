use chrono::{DateTime, Utc};

use crate::{
    error::DecodeError,
    model::Granularity,
    token::{Icon, Precipitation},
    wire::{self, ObjectReader, ObjectWriter, Record, WireMapping},
};

/// Weather data for a specific location and time.
///
/// One flat record serves every granularity; which fields are populated
/// depends on whether the point is a current observation or part of a
/// minutely, hourly or daily block. Absent fields are `None`, never zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataPoint {
    /// Start of the period this point covers, aligned to the minute, hour or
    /// local midnight depending on granularity.
    pub time: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub icon: Option<Icon>,

    /// Daily only.
    pub sunrise_time: Option<DateTime<Utc>>,
    /// Daily only.
    pub sunset_time: Option<DateTime<Utc>>,
    /// Fractional part of the lunation number: `0` new moon, `0.25` first
    /// quarter, `0.5` full moon, `0.75` last quarter. Daily only.
    pub moon_phase: Option<f64>,

    /// Currently only. A distance of `0` means a storm in the vicinity, not
    /// necessarily at the location.
    pub nearest_storm_distance: Option<f64>,
    /// Degrees clockwise from true north. Absent when the distance is `0`.
    pub nearest_storm_bearing: Option<f64>,

    /// Liquid water per hour. Conditional on precipitation occurring for
    /// minutely points, unconditional otherwise.
    pub precipitation_intensity: Option<f64>,
    /// Standard deviation of `precipitation_intensity`, when known.
    pub precipitation_intensity_error: Option<f64>,
    /// Daily only.
    pub precipitation_intensity_max: Option<f64>,
    /// Daily only.
    pub precipitation_intensity_max_time: Option<DateTime<Utc>>,
    /// Between `0` and `1`. Not validated.
    pub precipitation_probability: Option<f64>,
    /// Absent when the intensity is `0`.
    pub precipitation_type: Option<Precipitation>,
    /// Snowfall accumulation. Hourly and daily only.
    pub precipitation_accumulation: Option<f64>,

    /// Not defined on minutely points.
    pub temperature: Option<f64>,
    pub temperature_low: Option<f64>,
    pub temperature_low_time: Option<DateTime<Utc>>,
    pub temperature_high: Option<f64>,
    pub temperature_high_time: Option<DateTime<Utc>>,
    pub temperature_max: Option<f64>,
    pub temperature_max_time: Option<DateTime<Utc>>,
    pub temperature_min: Option<f64>,
    pub temperature_min_time: Option<DateTime<Utc>>,

    /// "Feels like" temperature. Not defined on daily points, which carry the
    /// low/high/max/min family below instead.
    pub apparent_temperature: Option<f64>,
    pub apparent_temperature_low: Option<f64>,
    pub apparent_temperature_low_time: Option<DateTime<Utc>>,
    pub apparent_temperature_high: Option<f64>,
    pub apparent_temperature_high_time: Option<DateTime<Utc>>,
    pub apparent_temperature_max: Option<f64>,
    pub apparent_temperature_max_time: Option<DateTime<Utc>>,
    pub apparent_temperature_min: Option<f64>,
    pub apparent_temperature_min_time: Option<DateTime<Utc>>,

    pub dew_point: Option<f64>,
    pub wind_gust: Option<f64>,
    /// Daily only.
    pub wind_gust_time: Option<DateTime<Utc>>,
    pub wind_speed: Option<f64>,
    /// Direction the wind is coming from, degrees clockwise from true north.
    /// Absent when the wind speed is `0`.
    pub wind_bearing: Option<f64>,
    /// Between `0` and `1`. Not validated.
    pub cloud_cover: Option<f64>,
    /// Between `0` and `1`. Not validated.
    pub humidity: Option<f64>,
    /// Sea-level air pressure.
    pub pressure: Option<f64>,
    /// Capped at 10 miles upstream.
    pub visibility: Option<f64>,
    /// Columnar density of total atmospheric ozone, in Dobson units.
    pub ozone: Option<f64>,
    pub uv_index: Option<f64>,
    /// Daily only.
    pub uv_index_time: Option<DateTime<Utc>>,
}

impl DataPoint {
    /// Internal names of the fields that are set, in wire-key order.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let value = wire::write_record(self);
        let Some(object) = value.as_object() else {
            return Vec::new();
        };

        object
            .keys()
            .filter_map(|key| Self::MAPPING.field_name(key))
            .filter_map(|name| FIELDS.iter().copied().find(|field| *field == name))
            .collect()
    }

    /// Set fields that `granularity` does not define.
    ///
    /// Upstream never sends these, so a non-empty result points at a point
    /// filed under the wrong block or a hand-edited payload.
    pub fn fields_outside(&self, granularity: Granularity) -> Vec<&'static str> {
        self.present_fields()
            .into_iter()
            .filter(|field| !granularity.defines(field))
            .collect()
    }
}

/// Every internal field name of [`DataPoint`].
pub const FIELDS: &[&str] = &[
    "time",
    "summary",
    "icon",
    "sunriseTime",
    "sunsetTime",
    "moonPhase",
    "nearestStormDistance",
    "nearestStormBearing",
    "precipitationIntensity",
    "precipitationIntensityError",
    "precipitationIntensityMax",
    "precipitationIntensityMaxTime",
    "precipitationProbability",
    "precipitationType",
    "precipitationAccumulation",
    "temperature",
    "temperatureLow",
    "temperatureLowTime",
    "temperatureHigh",
    "temperatureHighTime",
    "temperatureMax",
    "temperatureMaxTime",
    "temperatureMin",
    "temperatureMinTime",
    "apparentTemperature",
    "apparentTemperatureLow",
    "apparentTemperatureLowTime",
    "apparentTemperatureHigh",
    "apparentTemperatureHighTime",
    "apparentTemperatureMax",
    "apparentTemperatureMaxTime",
    "apparentTemperatureMin",
    "apparentTemperatureMinTime",
    "dewPoint",
    "windGust",
    "windGustTime",
    "windSpeed",
    "windBearing",
    "cloudCover",
    "humidity",
    "pressure",
    "visibility",
    "ozone",
    "uvIndex",
    "uvIndexTime",
];

impl Record for DataPoint {
    const MAPPING: &'static WireMapping = &wire::DATA_POINT;

    fn read(r: &ObjectReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            time: r.time("time")?,
            summary: r.optional("summary")?,
            icon: r.token("icon")?,
            sunrise_time: r.time("sunriseTime")?,
            sunset_time: r.time("sunsetTime")?,
            moon_phase: r.optional("moonPhase")?,
            nearest_storm_distance: r.optional("nearestStormDistance")?,
            nearest_storm_bearing: r.optional("nearestStormBearing")?,
            precipitation_intensity: r.optional("precipitationIntensity")?,
            precipitation_intensity_error: r.optional("precipitationIntensityError")?,
            precipitation_intensity_max: r.optional("precipitationIntensityMax")?,
            precipitation_intensity_max_time: r.time("precipitationIntensityMaxTime")?,
            precipitation_probability: r.optional("precipitationProbability")?,
            precipitation_type: r.token("precipitationType")?,
            precipitation_accumulation: r.optional("precipitationAccumulation")?,
            temperature: r.optional("temperature")?,
            temperature_low: r.optional("temperatureLow")?,
            temperature_low_time: r.time("temperatureLowTime")?,
            temperature_high: r.optional("temperatureHigh")?,
            temperature_high_time: r.time("temperatureHighTime")?,
            temperature_max: r.optional("temperatureMax")?,
            temperature_max_time: r.time("temperatureMaxTime")?,
            temperature_min: r.optional("temperatureMin")?,
            temperature_min_time: r.time("temperatureMinTime")?,
            apparent_temperature: r.optional("apparentTemperature")?,
            apparent_temperature_low: r.optional("apparentTemperatureLow")?,
            apparent_temperature_low_time: r.time("apparentTemperatureLowTime")?,
            apparent_temperature_high: r.optional("apparentTemperatureHigh")?,
            apparent_temperature_high_time: r.time("apparentTemperatureHighTime")?,
            apparent_temperature_max: r.optional("apparentTemperatureMax")?,
            apparent_temperature_max_time: r.time("apparentTemperatureMaxTime")?,
            apparent_temperature_min: r.optional("apparentTemperatureMin")?,
            apparent_temperature_min_time: r.time("apparentTemperatureMinTime")?,
            dew_point: r.optional("dewPoint")?,
            wind_gust: r.optional("windGust")?,
            wind_gust_time: r.time("windGustTime")?,
            wind_speed: r.optional("windSpeed")?,
            wind_bearing: r.optional("windBearing")?,
            cloud_cover: r.optional("cloudCover")?,
            humidity: r.optional("humidity")?,
            pressure: r.optional("pressure")?,
            visibility: r.optional("visibility")?,
            ozone: r.optional("ozone")?,
            uv_index: r.optional("uvIndex")?,
            uv_index_time: r.time("uvIndexTime")?,
        })
    }

    fn write(&self, w: &mut ObjectWriter) {
        w.time("time", self.time.as_ref());
        w.string("summary", self.summary.as_deref());
        w.token("icon", self.icon.as_ref());
        w.time("sunriseTime", self.sunrise_time.as_ref());
        w.time("sunsetTime", self.sunset_time.as_ref());
        w.number("moonPhase", self.moon_phase);
        w.number("nearestStormDistance", self.nearest_storm_distance);
        w.number("nearestStormBearing", self.nearest_storm_bearing);
        w.number("precipitationIntensity", self.precipitation_intensity);
        w.number("precipitationIntensityError", self.precipitation_intensity_error);
        w.number("precipitationIntensityMax", self.precipitation_intensity_max);
        w.time("precipitationIntensityMaxTime", self.precipitation_intensity_max_time.as_ref());
        w.number("precipitationProbability", self.precipitation_probability);
        w.token("precipitationType", self.precipitation_type.as_ref());
        w.number("precipitationAccumulation", self.precipitation_accumulation);
        w.number("temperature", self.temperature);
        w.number("temperatureLow", self.temperature_low);
        w.time("temperatureLowTime", self.temperature_low_time.as_ref());
        w.number("temperatureHigh", self.temperature_high);
        w.time("temperatureHighTime", self.temperature_high_time.as_ref());
        w.number("temperatureMax", self.temperature_max);
        w.time("temperatureMaxTime", self.temperature_max_time.as_ref());
        w.number("temperatureMin", self.temperature_min);
        w.time("temperatureMinTime", self.temperature_min_time.as_ref());
        w.number("apparentTemperature", self.apparent_temperature);
        w.number("apparentTemperatureLow", self.apparent_temperature_low);
        w.time("apparentTemperatureLowTime", self.apparent_temperature_low_time.as_ref());
        w.number("apparentTemperatureHigh", self.apparent_temperature_high);
        w.time("apparentTemperatureHighTime", self.apparent_temperature_high_time.as_ref());
        w.number("apparentTemperatureMax", self.apparent_temperature_max);
        w.time("apparentTemperatureMaxTime", self.apparent_temperature_max_time.as_ref());
        w.number("apparentTemperatureMin", self.apparent_temperature_min);
        w.time("apparentTemperatureMinTime", self.apparent_temperature_min_time.as_ref());
        w.number("dewPoint", self.dew_point);
        w.number("windGust", self.wind_gust);
        w.time("windGustTime", self.wind_gust_time.as_ref());
        w.number("windSpeed", self.wind_speed);
        w.number("windBearing", self.wind_bearing);
        w.number("cloudCover", self.cloud_cover);
        w.number("humidity", self.humidity);
        w.number("pressure", self.pressure);
        w.number("visibility", self.visibility);
        w.number("ozone", self.ozone);
        w.number("uvIndex", self.uv_index);
        w.time("uvIndexTime", self.uv_index_time.as_ref());
    }
}
