//! Typed data model for Dark Sky style forecast responses.
//!
//! This crate defines:
//! - Records for a response and its parts (`Forecast`, `DataBlock`,
//!   `DataPoint`, `Alert`, `Flag`)
//! - Closed token enumerations (`Icon`, `Precipitation`, `Units`, `Severity`)
//! - The wire mapping between JSON keys and field names, and the codec
//!   applying it in both directions
//!
//! It performs no I/O. Callers hand it JSON bytes from whatever transport or
//! cache they use and get typed records back.

pub mod codec;
pub mod error;
pub mod model;
pub mod options;
pub mod token;
pub mod wire;

pub use error::{DecodeError, ParsePolicyError};
pub use model::{Alert, DataBlock, DataPoint, Flag, Forecast, Granularity};
pub use options::{DecodeOptions, UnknownTokenPolicy};
pub use token::{Icon, Precipitation, Severity, Token, Units};
pub use wire::{Record, WireMapping};
