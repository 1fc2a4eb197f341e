//! pop-db - Population store for popchart
//!
//! This crate provides the `PopulationStore` trait, its DuckDB
//! implementation, and the streaming CSV loader that fills it.

pub mod duckdb;
pub mod error;
pub mod loader;
pub mod traits;

pub use duckdb::{DuckDbBackend, POPULATION_TABLE};
pub use error::{DbError, DbResult};
pub use loader::{load_csv, load_csv_reader, IngestSummary};
pub use traits::PopulationStore;
