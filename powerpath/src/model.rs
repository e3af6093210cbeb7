//! Types shared by the catalog, the classifiers and the aggregator

mod field;
mod register;
mod snapshot;
mod status;

pub use field::*;
pub use register::*;
pub use snapshot::*;
pub use status::*;
