//! DuckDB population store

use crate::error::{DbError, DbResult};
use crate::traits::PopulationStore;
use async_trait::async_trait;
use duckdb::Connection;
use pop_core::PopulationRecord;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Name of the single table holding population records
pub const POPULATION_TABLE: &str = "population_growth";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS population_growth (
    year INTEGER NOT NULL,
    country VARCHAR NOT NULL,
    population BIGINT NOT NULL
)";

const INSERT_SQL: &str =
    "INSERT INTO population_growth (year, country, population) VALUES (?, ?, ?)";

/// DuckDB-backed population store
///
/// The table is created on open if it does not exist. Rows are never updated
/// or deleted, so repeated ingestion appends.
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory store
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// Open (or create) a store at a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Self::with_connection(conn)
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn with_connection(conn: Connection) -> DbResult<Self> {
        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| DbError::ExecutionError(format!("create {POPULATION_TABLE}: {e}")))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn insert_sync(&self, record: &PopulationRecord) -> DbResult<()> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(INSERT_SQL)?;
        stmt.execute(duckdb::params![
            record.year,
            record.country,
            record.population
        ])
        .map_err(|e| {
            DbError::ExecutionError(format!(
                "insert ({}, {}, {}): {e}",
                record.year, record.country, record.population
            ))
        })?;
        Ok(())
    }

    fn select_by_countries_sync(&self, countries: &[String]) -> DbResult<Vec<PopulationRecord>> {
        if countries.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; countries.len()].join(", ");
        let sql = format!(
            "SELECT year, country, population FROM {POPULATION_TABLE} WHERE country IN ({placeholders})"
        );

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(duckdb::params_from_iter(countries.iter()), |row| {
            Ok(PopulationRecord {
                year: row.get(0)?,
                country: row.get(1)?,
                population: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    fn count_sync(&self) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {POPULATION_TABLE}"),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

#[async_trait]
impl PopulationStore for DuckDbBackend {
    async fn insert(&self, record: &PopulationRecord) -> DbResult<()> {
        self.insert_sync(record)
    }

    async fn select_by_countries(
        &self,
        countries: &[String],
    ) -> DbResult<Vec<PopulationRecord>> {
        self.select_by_countries_sync(countries)
    }

    async fn count(&self) -> DbResult<usize> {
        self.count_sync()
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
