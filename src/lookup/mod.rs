//! Batch orchestration: request validation, bounded fan-out and result aggregation.

pub(crate) mod engine;
mod request;
mod throttle;

pub use engine::{DispatchOptions, ResultSet, lookup_volumes};
pub use request::{InputError, VolumeRequest};
