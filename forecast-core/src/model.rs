//! Response records.
//!
//! Every record implements [`Record`](crate::wire::Record) and decodes
//! through the wire mapping declared next to it.

pub mod alert;
pub mod block;
pub mod data_point;
pub mod flag;
pub mod forecast;
pub mod granularity;

pub use alert::Alert;
pub use block::DataBlock;
pub use data_point::DataPoint;
pub use flag::Flag;
pub use forecast::Forecast;
pub use granularity::Granularity;
