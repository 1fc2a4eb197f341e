//! pop-core - Core library for popchart
//!
//! This crate provides the population record type, the CSV row mapping used
//! by the loader, and the `popchart.yml` configuration shared by the server
//! and the viewer.

pub mod config;
pub mod error;
pub mod record;

pub use config::{Config, DEFAULT_COUNTRIES};
pub use error::{CoreError, CoreResult};
pub use record::{CsvRow, PopulationRecord};
