use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Movie metadata API settings. The API key is kept in the credentials file, not here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    /// Queries shorter than this (after trimming) never reach the network
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Key (file stem in the data dir) holding the watched list
    #[serde(default = "default_watched_key")]
    pub watched_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExchangeConfig {
    #[serde(default = "default_exchange_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr. A bare file name lands in the logs directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_omdb_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_exchange_base_url() -> String {
    "https://api.frankfurter.app".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_min_query_length() -> usize {
    3
}

fn default_watched_key() -> String {
    "watched".to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_omdb_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { min_query_length: default_min_query_length() }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { watched_key: default_watched_key() }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_exchange_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise use defaults for everything
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.omdb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("omdb.base_url cannot be empty"));
        }
        if self.exchange.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("exchange.base_url cannot be empty"));
        }
        if self.omdb.request_timeout_secs == 0 || self.exchange.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("request_timeout_secs must be greater than zero"));
        }
        if self.search.min_query_length == 0 {
            return Err(anyhow::anyhow!("search.min_query_length must be at least 1"));
        }
        let key = &self.storage.watched_key;
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(anyhow::anyhow!("storage.watched_key must be non-empty and contain only letters, digits, '_' or '-'"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.omdb.request_timeout_secs = 30;
        config.storage.watched_key = "my_list".to_string();

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.omdb.request_timeout_secs, 30);
        assert_eq!(loaded.storage.watched_key, "my_list");
        assert_eq!(loaded.search.min_query_length, 3);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[search]\nmin_query_length = 4\n").unwrap();
        assert_eq!(config.search.min_query_length, 4);
        assert_eq!(config.omdb.base_url, "https://www.omdbapi.com/");
        assert_eq!(config.exchange.base_url, "https://api.frankfurter.app");
        assert_eq!(config.storage.watched_key, "watched");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.omdb.request_timeout_secs, 10);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.storage.watched_key = "../escape".to_string();
        assert!(config.validate().is_err());

        config.storage.watched_key = "watched".to_string();
        config.search.min_query_length = 0;
        assert!(config.validate().is_err());

        config.search.min_query_length = 3;
        config.omdb.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
