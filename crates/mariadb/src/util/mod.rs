pub mod conditions;
pub mod errors;
pub mod status;
pub mod telemetry;

pub use errors::{Error, Result};
