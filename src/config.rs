use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default data source
    #[serde(default)]
    pub source: SourceConfig,

    /// Remote document store
    #[serde(default)]
    pub store: StoreConfig,

    /// Host-side search guards
    #[serde(default)]
    pub search: SearchOptions,

    /// Upload behavior
    #[serde(default)]
    pub upload: UploadOptions,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: COMPANY_DIR)
            .add_source(
                config::Environment::with_prefix("COMPANY_DIR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// Default CSV source (URL or local path) for `load_csv`
    pub csv: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the document store
    #[serde(default = "default_store_url")]
    pub base_url: String,

    /// Collection holding the company documents
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Request timeout (seconds)
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_url(),
            collection: default_collection(),
            timeout_secs: default_store_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Queries shorter than this are never dispatched to the engine
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Quiet period before a changed input is dispatched (milliseconds)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl SearchOptions {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOptions {
    /// Writes per batch; the store caps batches at 500
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

fn default_store_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_collection() -> String {
    "companies".to_string()
}

fn default_store_timeout() -> u64 {
    30
}

fn default_min_query_len() -> usize {
    2
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_batch_size() -> usize {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_host_contract() {
        let config = Config::default();
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.upload.batch_size, 500);
        assert_eq!(config.store.collection, "companies");
    }

    #[test]
    fn embedded_defaults_deserialize() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.upload.batch_size, 500);
    }
}
