use crate::{
    error::DecodeError,
    model::DataPoint,
    token::Icon,
    wire::{self, ObjectReader, ObjectWriter, Record, WireMapping},
};

/// Weather data over a period of time, as a sequence of points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataBlock {
    pub summary: Option<String>,
    pub icon: Option<Icon>,
    /// Points ordered by time, oldest first.
    pub data: Vec<DataPoint>,
}

impl DataBlock {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Record for DataBlock {
    const MAPPING: &'static WireMapping = &wire::DATA_BLOCK;

    fn read(r: &ObjectReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            summary: r.optional("summary")?,
            icon: r.token("icon")?,
            data: r.required_records("data")?,
        })
    }

    fn write(&self, w: &mut ObjectWriter) {
        w.string("summary", self.summary.as_deref());
        w.token("icon", self.icon.as_ref());
        w.records("data", Some(self.data.as_slice()));
    }
}
