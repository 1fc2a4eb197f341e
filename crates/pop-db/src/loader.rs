//! Streaming CSV loader
//!
//! Reads the dataset one row at a time and issues one insert per row. The
//! first malformed row or failed insert aborts the run; rows inserted before
//! it stay in the store.

use crate::error::{DbError, DbResult};
use crate::traits::PopulationStore;
use pop_core::{CsvRow, PopulationRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header columns the loader requires (case-sensitive)
pub const REQUIRED_COLUMNS: &[&str] = &["Year", "Country", "Population"];

/// Outcome of a completed ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Number of data rows inserted
    pub rows: usize,
}

/// Load a CSV file into the store
pub async fn load_csv(store: &dyn PopulationStore, path: &Path) -> DbResult<IngestSummary> {
    let file =
        File::open(path).map_err(|e| DbError::CsvError(format!("{}: {e}", path.display())))?;
    log::info!(
        "Loading {} into {} store",
        path.display(),
        store.db_type()
    );
    load_csv_reader(store, file).await
}

/// Load CSV data from any reader into the store
pub async fn load_csv_reader<R: Read + Send>(
    store: &dyn PopulationStore,
    reader: R,
) -> DbResult<IngestSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DbError::CsvError(format!("failed to read header: {e}")))?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(DbError::CsvError(format!(
                "missing required column '{column}'"
            )));
        }
    }

    let mut rows = 0;
    for result in csv_reader.deserialize::<CsvRow>() {
        // Data rows are numbered from 1; the header is not counted
        let row_number = rows + 1;
        let row = result.map_err(|e| {
            log::error!("Malformed CSV row {row_number}: {e}");
            DbError::MalformedRow {
                row: row_number,
                message: e.to_string(),
            }
        })?;

        let record = PopulationRecord::from(row);
        if let Err(e) = store.insert(&record).await {
            log::error!("Insert failed at CSV row {row_number}: {e}");
            return Err(e);
        }
        rows += 1;
    }

    log::info!("CSV file successfully processed ({rows} rows)");
    Ok(IngestSummary { rows })
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
