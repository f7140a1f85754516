pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, ExchangeConfig, LoggingConfig, OmdbConfig, SearchConfig, StorageConfig};
pub use credentials::{CredentialStore, API_KEY_ENV};
pub use paths::{PathManager, home_override};
