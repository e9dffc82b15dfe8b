use crate::{
    error::DecodeError,
    model::DataPoint,
    token::Units,
    wire::{self, ObjectReader, ObjectWriter, Record, WireMapping},
};

/// Metadata about a forecast response: provenance and the unit system.
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    /// Present when the location is supported but a temporary upstream error
    /// (e.g. a radar station down for maintenance) made data unavailable.
    pub dark_sky_unavailable: Option<String>,
    /// Distance to the nearest contributing station. Debugging aid only;
    /// other stations may also have been used.
    pub nearest_station: Option<f64>,
    /// IDs of the stations used to service the request.
    pub sources: Vec<String>,
    /// Unit system of every numeric field in the response.
    pub units: Units,
    /// Whether consumers should prefer apparent over actual temperatures.
    /// Never read from or written to the wire.
    pub feels_like: bool,
}

impl Flag {
    pub const DEFAULT_FEELS_LIKE: bool = true;

    pub fn new(sources: Vec<String>, units: Units) -> Self {
        Self {
            dark_sky_unavailable: None,
            nearest_station: None,
            sources,
            units,
            feels_like: Self::DEFAULT_FEELS_LIKE,
        }
    }

    pub fn is_source_unavailable(&self) -> bool {
        self.dark_sky_unavailable.is_some()
    }

    /// Apparent or actual temperature of `point`, per [`Flag::feels_like`].
    /// No fallback between the two.
    pub fn preferred_temperature(&self, point: &DataPoint) -> Option<f64> {
        if self.feels_like {
            point.apparent_temperature
        } else {
            point.temperature
        }
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::new(Vec::new(), Units::default())
    }
}

impl Record for Flag {
    const MAPPING: &'static WireMapping = &wire::FLAG;

    fn read(r: &ObjectReader<'_>) -> Result<Self, DecodeError> {
        let mut flag = Flag::new(r.required("sources")?, r.required_token("units")?);
        flag.dark_sky_unavailable = r.optional("darkSkyUnavailable")?;
        flag.nearest_station = r.optional("nearestStation")?;

        Ok(flag)
    }

    fn write(&self, w: &mut ObjectWriter) {
        w.string("darkSkyUnavailable", self.dark_sky_unavailable.as_deref());
        w.number("nearestStation", self.nearest_station);
        w.strings("sources", &self.sources);
        w.token("units", Some(&self.units));
    }
}
