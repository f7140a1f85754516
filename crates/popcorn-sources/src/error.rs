use thiserror::Error;

/// Message shown for any transport-level failure against the metadata API
pub const GENERIC_FETCH_ERROR: &str = "Something went wrong with fetching movies";

/// Outcome of a source call that did not produce data.
///
/// Cancelled requests never produce one: the caller drops them before they complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Well-formed response saying there is no match
    #[error("Movie not found")]
    NotFound,
    /// Network failure, timeout, non-success status or undecodable body
    #[error("{0}")]
    Transport(String),
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        SourceError::Transport(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound)
    }
}
