use crate::error::SourceError;
use crate::traits::RateSource;
use anyhow::Result;
use async_trait::async_trait;
use popcorn_config::ExchangeConfig;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// Currency conversion against the Frankfurter exchange-rate API
#[derive(Clone)]
pub struct FrankfurterClient {
    client: Arc<Client>,
    base_url: String,
}

impl FrankfurterClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ExchangeConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), Duration::from_secs(config.request_timeout_secs))
    }
}

#[async_trait]
impl RateSource for FrankfurterClient {
    fn source_name(&self) -> &str {
        "frankfurter"
    }

    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, SourceError> {
        let url = format!("{}/latest", self.base_url);
        let amount_param = amount.to_string();
        debug!(amount = amount, from = %from, to = %to, "Requesting exchange rate");

        let response = self
            .client
            .get(&url)
            .query(&[("amount", amount_param.as_str()), ("from", from), ("to", to)])
            .send()
            .await
            .map_err(|e| {
                warn!("Exchange request failed: {}", e);
                SourceError::transport("Bad request")
            })?;

        if !response.status().is_success() {
            warn!("Exchange request returned HTTP {}", response.status());
            return Err(SourceError::transport("Bad request"));
        }

        let body: LatestRatesResponse = response.json().await.map_err(|e| {
            warn!("Failed to decode exchange response: {}", e);
            SourceError::transport("Bad request")
        })?;

        body.rates.get(to).copied().ok_or(SourceError::NotFound)
    }
}
