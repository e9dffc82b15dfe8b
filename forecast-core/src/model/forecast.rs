use crate::{
    error::DecodeError,
    model::{Alert, DataBlock, DataPoint, Flag, Granularity},
    wire::{self, ObjectReader, ObjectWriter, Record, WireMapping},
};

/// A complete forecast response for one location.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name of the location, e.g. `America/New_York`.
    pub timezone: String,
    /// Current UTC offset in hours. Deprecated upstream.
    pub offset: Option<f64>,
    pub currently: Option<DataPoint>,
    pub minutely: Option<DataBlock>,
    pub hourly: Option<DataBlock>,
    pub daily: Option<DataBlock>,
    pub alerts: Option<Vec<Alert>>,
    pub flags: Option<Flag>,
}

impl Forecast {
    pub fn block(&self, granularity: Granularity) -> Option<&DataBlock> {
        match granularity {
            Granularity::Currently => None,
            Granularity::Minutely => self.minutely.as_ref(),
            Granularity::Hourly => self.hourly.as_ref(),
            Granularity::Daily => self.daily.as_ref(),
        }
    }

    /// Every point in the response tagged with its granularity: the current
    /// conditions first, then the minutely, hourly and daily blocks in order.
    pub fn points(&self) -> impl Iterator<Item = (Granularity, &DataPoint)> {
        let current = self
            .currently
            .iter()
            .map(|point| (Granularity::Currently, point));

        let blocks = [Granularity::Minutely, Granularity::Hourly, Granularity::Daily]
            .into_iter()
            .filter_map(|granularity| self.block(granularity).map(|block| (granularity, block)))
            .flat_map(|(granularity, block)| {
                block.data.iter().map(move |point| (granularity, point))
            });

        current.chain(blocks)
    }

    /// Sets the apparent-temperature preference on the flags block, if any.
    pub fn set_feels_like(&mut self, feels_like: bool) {
        if let Some(flags) = self.flags.as_mut() {
            flags.feels_like = feels_like;
        }
    }
}

impl Record for Forecast {
    const MAPPING: &'static WireMapping = &wire::FORECAST;

    fn read(r: &ObjectReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            latitude: r.required("latitude")?,
            longitude: r.required("longitude")?,
            timezone: r.required("timezone")?,
            offset: r.optional("offset")?,
            currently: r.record("currently")?,
            minutely: r.record("minutely")?,
            hourly: r.record("hourly")?,
            daily: r.record("daily")?,
            alerts: r.records("alerts")?,
            flags: r.record("flags")?,
        })
    }

    fn write(&self, w: &mut ObjectWriter) {
        w.number("latitude", Some(self.latitude));
        w.number("longitude", Some(self.longitude));
        w.string("timezone", Some(self.timezone.as_str()));
        w.number("offset", self.offset);
        w.record("currently", self.currently.as_ref());
        w.record("minutely", self.minutely.as_ref());
        w.record("hourly", self.hourly.as_ref());
        w.record("daily", self.daily.as_ref());
        w.records("alerts", self.alerts.as_deref());
        w.record("flags", self.flags.as_ref());
    }
}
