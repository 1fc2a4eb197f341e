//! Population store trait definition

use crate::error::DbResult;
use async_trait::async_trait;
use pop_core::PopulationRecord;

/// Storage for population records.
///
/// Implementations must be Send + Sync so one handle can be shared by the
/// loader and the HTTP handlers.
#[async_trait]
pub trait PopulationStore: Send + Sync {
    /// Insert one record
    async fn insert(&self, record: &PopulationRecord) -> DbResult<()>;

    /// All records whose country is in `countries`, in the store's natural order
    async fn select_by_countries(&self, countries: &[String])
        -> DbResult<Vec<PopulationRecord>>;

    /// Number of stored records
    async fn count(&self) -> DbResult<usize>;

    /// Store type identifier for logging
    fn db_type(&self) -> &'static str;
}
