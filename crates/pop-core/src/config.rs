//! Configuration types and parsing for popchart.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Countries served by `GET /population` when no allowlist is configured
pub const DEFAULT_COUNTRIES: &[&str] = &["USA", "Brazil", "Canada", "Mexico", "Argentina"];

/// File names searched for in the working directory
const CONFIG_FILE_NAMES: &[&str] = &["popchart.yml", "popchart.yaml"];

/// Runtime configuration from popchart.yml
///
/// Every key is optional; a missing file yields [`Config::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Host the HTTP server binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// DuckDB database path (or `:memory:`)
    #[serde(default = "default_database")]
    pub database: String,

    /// Database user, kept for configs shared with networked backends
    #[serde(default)]
    pub user: Option<String>,

    /// Database password, kept for configs shared with networked backends
    #[serde(default)]
    pub password: Option<String>,

    /// CSV file ingested at startup
    #[serde(default = "default_csv_path", alias = "csvPath")]
    pub csv_path: String,

    /// Country allowlist for the query service
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,

    /// Milliseconds between year advances while playing
    #[serde(default = "default_play_interval_ms")]
    pub play_interval_ms: u64,

    /// Base URL the viewer fetches from
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: None,
            password: None,
            csv_path: default_csv_path(),
            countries: default_countries(),
            play_interval_ms: default_play_interval_ms(),
            api_url: default_api_url(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_database() -> String {
    "population.duckdb".to_string()
}

fn default_csv_path() -> String {
    "./population-and-demography.csv".to_string()
}

fn default_countries() -> Vec<String> {
    DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
}

fn default_play_interval_ms() -> u64 {
    2000
}

fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn parse(content: &str) -> CoreResult<Self> {
        // An empty file deserializes to a null document rather than an empty map
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Otherwise `popchart.yml` / `popchart.yaml`
    /// in `dir` is used when present, falling back to defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> CoreResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.exists() {
                log::debug!("Using config file {}", candidate.display());
                return Self::load(&candidate);
            }
        }

        log::debug!("No config file in {}, using defaults", dir.display());
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.port == 0 {
            return Err(invalid("port must be non-zero"));
        }
        if self.database.trim().is_empty() {
            return Err(invalid("database path cannot be empty"));
        }
        if self.csv_path.trim().is_empty() {
            return Err(invalid("csv_path cannot be empty"));
        }
        if self.countries.is_empty() {
            return Err(invalid("countries allowlist cannot be empty"));
        }
        if let Some(blank) = self.countries.iter().position(|c| c.trim().is_empty()) {
            return Err(invalid(&format!("countries[{blank}] is blank")));
        }
        if self.play_interval_ms == 0 {
            return Err(invalid("play_interval_ms must be greater than zero"));
        }
        Ok(())
    }

    /// `host:port` address for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Interval between year advances during playback
    pub fn play_interval(&self) -> Duration {
        Duration::from_millis(self.play_interval_ms)
    }

    /// Whether database credentials were supplied
    pub fn has_credentials(&self) -> bool {
        self.user.is_some() || self.password.is_some()
    }
}

fn invalid(message: &str) -> CoreError {
    CoreError::ConfigInvalid {
        message: message.to_string(),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
