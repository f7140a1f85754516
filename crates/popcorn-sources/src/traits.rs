use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultItem};
use crate::error::SourceError;

#[async_trait]
pub trait MovieSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Title search. `NotFound` when the API reports no match.
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError>;

    /// Full record for one IMDb id.
    async fn details(&self, id: &str) -> Result<MovieDetail, SourceError>;
}

#[async_trait]
pub trait RateSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Convert `amount` of currency `from` into currency `to`.
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, SourceError>;
}
