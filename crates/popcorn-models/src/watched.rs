use serde::{Deserialize, Deserializer, Serialize};
use crate::movie::MovieDetail;

/// Number as the browser client stored it: raw OMDb text ("8.8", "N/A") or a number, possibly null
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNumber {
    Number(f64),
    Text(String),
}

/// Leading number of a stored value; null, "N/A" and anything unparseable read as 0
fn stored_number(value: Option<StoredNumber>) -> f64 {
    let parsed = match value {
        Some(StoredNumber::Number(n)) => Some(n),
        Some(StoredNumber::Text(text)) => text
            .split_whitespace()
            .next()
            .and_then(|n| n.parse::<f64>().ok()),
        None => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(stored_number(Option::deserialize(deserializer)?))
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = stored_number(Option::deserialize(deserializer)?);
    if minutes < 0.0 || minutes > f64::from(u32::MAX) {
        return Ok(0);
    }
    Ok(minutes.round() as u32)
}

/// A movie the user has confirmed as watched, with their own rating.
///
/// Field names on the wire match the list the browser client kept in local storage,
/// so an exported list can be used as the stored file unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster")]
    pub poster_url: String,
    #[serde(rename = "userRating")]
    pub user_rating: u8, // 0-10
    #[serde(rename = "imdbRating", default, deserialize_with = "lenient_rating")]
    pub imdb_rating: f64,
    #[serde(rename = "runtime", default, deserialize_with = "lenient_minutes")]
    pub runtime_minutes: u32,
}

impl WatchedEntry {
    /// Build an entry from fetched details. Missing IMDb rating or runtime count as 0.
    pub fn from_detail(detail: &MovieDetail, user_rating: u8) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            user_rating,
            imdb_rating: detail.imdb_rating.unwrap_or(0.0),
            runtime_minutes: detail.runtime_minutes().unwrap_or(0),
        }
    }
}
