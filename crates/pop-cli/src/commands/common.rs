//! Shared helpers for command implementations

use anyhow::{Context, Result};
use pop_core::Config;
use pop_db::{DuckDbBackend, PopulationStore};
use std::path::Path;
use std::sync::Arc;

use crate::cli::{GlobalArgs, SourceArgs};

/// Resolve the config file (explicit `--config`, else `popchart.yml` in the
/// working directory, else defaults)
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    Config::resolve(global.config.as_deref().map(Path::new), Path::new("."))
        .context("Failed to load configuration")
}

/// Apply `--database` / `--csv-path` overrides
pub(crate) fn apply_source_args(config: &mut Config, source: &SourceArgs) {
    if let Some(database) = &source.database {
        config.database = database.clone();
    }
    if let Some(csv_path) = &source.csv_path {
        config.csv_path = csv_path.clone();
    }
}

/// Open the population store named by the config
pub(crate) fn open_store(config: &Config) -> Result<Arc<dyn PopulationStore>> {
    if config.has_credentials() {
        log::warn!("user/password are set but the embedded DuckDB store has no authentication; ignoring them");
    }

    let store = DuckDbBackend::new(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database))?;
    log::info!("Connected to {} database {}", store.db_type(), config.database);
    Ok(Arc::new(store))
}
