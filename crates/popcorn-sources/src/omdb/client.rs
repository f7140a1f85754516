use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieSource;
use anyhow::Result;
use async_trait::async_trait;
use popcorn_config::OmdbConfig;
use popcorn_models::{MovieDetail, SearchResultItem};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("OMDb API key is empty"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into(),
            api_key,
        })
    }

    pub fn from_config(config: &OmdbConfig, api_key: impl Into<String>) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError> {
        debug!(query = %query, "OMDb search");
        api::search(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn details(&self, id: &str) -> Result<MovieDetail, SourceError> {
        debug!(imdb_id = %id, "OMDb detail lookup");
        api::get_details(&self.client, &self.base_url, &self.api_key, id).await
    }
}
