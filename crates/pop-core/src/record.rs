//! Population records and their CSV representation

use serde::{Deserialize, Serialize};

/// One (year, country, population) observation.
///
/// This is both the stored row and the JSON object served by `GET /population`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub year: i32,
    pub country: String,
    pub population: i64,
}

impl PopulationRecord {
    pub fn new(year: i32, country: impl Into<String>, population: i64) -> Self {
        Self {
            year,
            country: country.into(),
            population,
        }
    }
}

/// A data row of the input CSV.
///
/// Header names are matched exactly (`Year`, `Country`, `Population`);
/// any other columns in the file are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "Population")]
    pub population: i64,
}

impl From<CsvRow> for PopulationRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            year: row.year,
            country: row.country,
            population: row.population,
        }
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
