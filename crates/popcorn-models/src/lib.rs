pub mod conversion;
pub mod movie;
pub mod search_result;
pub mod watched;

pub use conversion::Conversion;
pub use movie::MovieDetail;
pub use search_result::SearchResultItem;
pub use watched::WatchedEntry;
