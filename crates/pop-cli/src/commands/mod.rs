//! Command implementations

pub(crate) mod common;
pub mod ingest;
pub mod serve;
pub mod view;
