//! Powerpath --- Classify the power paths of a BQ25672 charger from a snapshot of its status
//! registers, and decode, describe and gate writes to those registers.

// Export full API at crate root
pub use api::*;

mod aggregate;
mod api;
mod catalog;
mod classify;
mod config;
mod dependency;
mod error;
mod interrupt;
mod model;
mod parse_json;
mod toggle;
mod util;
