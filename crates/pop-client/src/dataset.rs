//! The fetched dataset and its derived indexes

use crate::error::{ClientError, ClientResult};
use pop_core::PopulationRecord;
use std::collections::{BTreeSet, HashMap, HashSet};

/// All records of one fetch plus the lookups derived from them.
///
/// Always holds at least one record; `years` is sorted, distinct and non-empty.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<PopulationRecord>,
    years: Vec<i32>,
    countries: Vec<String>,
    populations: HashMap<i32, HashMap<String, i64>>,
}

impl Dataset {
    /// Build the dataset, rejecting an empty fetch result
    pub fn from_records(records: Vec<PopulationRecord>) -> ClientResult<Self> {
        if records.is_empty() {
            return Err(ClientError::NoData);
        }

        let years: Vec<i32> = records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let countries: Vec<String> = {
            let mut seen = HashSet::new();
            records
                .iter()
                .filter(|r| seen.insert(r.country.as_str()))
                .map(|r| r.country.clone())
                .collect()
        };

        let mut populations: HashMap<i32, HashMap<String, i64>> = HashMap::new();
        for record in &records {
            // First row wins when ingestion was repeated
            populations
                .entry(record.year)
                .or_default()
                .entry(record.country.clone())
                .or_insert(record.population);
        }

        Ok(Self {
            records,
            years,
            countries,
            populations,
        })
    }

    pub fn records(&self) -> &[PopulationRecord] {
        &self.records
    }

    /// Distinct years, ascending
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Distinct countries in order of first appearance
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn earliest_year(&self) -> i32 {
        self.years[0]
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    /// The year after `year`, wrapping to the first after the last
    pub fn next_year(&self, year: i32) -> i32 {
        match self.years.binary_search(&year) {
            Ok(index) => self.years[(index + 1) % self.years.len()],
            Err(_) => self.earliest_year(),
        }
    }

    /// Population of `country` in `year`, if a record exists
    pub fn population(&self, year: i32, country: &str) -> Option<i64> {
        self.populations
            .get(&year)
            .and_then(|by_country| by_country.get(country))
            .copied()
    }
}
