pub mod error;
pub mod frankfurter;
pub mod omdb;
pub mod traits;

pub use error::{SourceError, GENERIC_FETCH_ERROR};
pub use frankfurter::FrankfurterClient;
pub use omdb::OmdbClient;
pub use traits::{MovieSource, RateSource};
