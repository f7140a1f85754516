pub mod browse;
pub mod clear;
pub mod config;
pub mod convert;
pub mod progress;
pub mod prompts;
pub mod render;
pub mod search;
pub mod watched;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, CredentialStore, PathManager, API_KEY_ENV};
use popcorn_core::{FileKeyValueStore, MovieSession, PersistentList, SessionOptions};
use popcorn_models::WatchedEntry;
use popcorn_sources::OmdbClient;
use std::sync::Arc;
use tracing::debug;

/// Config from the default location, or defaults when no file exists
pub fn load_config() -> Result<Config> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
    Ok(config)
}

/// Persistent handle on the watched list, stored under the configured key
pub fn watched_store(config: &Config, path_manager: &PathManager) -> PersistentList<WatchedEntry> {
    let store = FileKeyValueStore::new(path_manager.data_dir());
    PersistentList::new(Arc::new(store), config.storage.watched_key.clone())
}

/// Search session backed by OMDb and the on-disk watched list
pub fn open_session(config: &Config) -> Result<MovieSession<OmdbClient>> {
    let path_manager = PathManager::default();

    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    let api_key = cred_store.resolve_omdb_api_key().ok_or_else(|| {
        eyre!(
            "No OMDb API key configured. Run 'popcorn config api-key' or set {}.",
            API_KEY_ENV
        )
    })?;

    let client = OmdbClient::from_config(&config.omdb, api_key)
        .map_err(|e| eyre!("Failed to create OMDb client: {}", e))?;
    debug!(base_url = %client.base_url(), "OMDb client ready");

    let session = MovieSession::new(
        Arc::new(client),
        watched_store(config, &path_manager),
        SessionOptions::from_config(config),
    )?;
    Ok(session)
}
