use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store key '{0}'")]
    InvalidKey(String),
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No movie details are loaded")]
    NoMovieSelected,
    #[error("Rating must be between 0 and 10, got {0}")]
    InvalidRating(u8),
    #[error(transparent)]
    Store(#[from] StoreError),
}
