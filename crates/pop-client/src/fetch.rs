//! One-shot data fetch from the query service

use crate::dataset::Dataset;
use crate::error::{ClientError, ClientResult};
use pop_core::PopulationRecord;

/// Fetches `GET {base_url}/population`
pub struct Fetcher {
    client: reqwest::Client,
    url: String,
}

impl Fetcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: population_url(base_url),
        }
    }

    /// Full endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw record list
    pub async fn fetch(&self) -> ClientResult<Vec<PopulationRecord>> {
        log::debug!("Fetching {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let records: Vec<PopulationRecord> = response.json().await?;
        log::debug!("Fetched {} records", records.len());
        Ok(records)
    }

    /// Fetch and index the dataset; an empty result is an error
    pub async fn load(&self) -> ClientResult<Dataset> {
        Dataset::from_records(self.fetch().await?)
    }
}

fn population_url(base_url: &str) -> String {
    format!("{}/population", base_url.trim_end_matches('/'))
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
