use serde::{Deserialize, Serialize};

/// One hit from the metadata search endpoint. Lives only as long as the current query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResultItem {
    pub id: String, // IMDb id, e.g. "tt1375666"
    pub title: String,
    pub year: String,
    pub poster_url: String,
}
