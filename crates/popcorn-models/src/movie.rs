use serde::{Deserialize, Serialize};

/// Full record for a single title, fetched lazily when a search result is selected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    /// Raw runtime as reported upstream, e.g. "148 min"
    pub runtime_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<f64>,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    /// Leading integer of `runtime_text` ("148 min" -> 148).
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime_text
            .split_whitespace()
            .next()
            .and_then(|n| n.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_with_runtime(runtime: &str) -> MovieDetail {
        MovieDetail {
            id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster_url: String::new(),
            runtime_text: runtime.to_string(),
            imdb_rating: Some(8.8),
            plot: String::new(),
            released: String::new(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
        }
    }

    #[test]
    fn test_runtime_minutes() {
        assert_eq!(detail_with_runtime("148 min").runtime_minutes(), Some(148));
        assert_eq!(detail_with_runtime("90").runtime_minutes(), Some(90));
        assert_eq!(detail_with_runtime("N/A").runtime_minutes(), None);
        assert_eq!(detail_with_runtime("").runtime_minutes(), None);
    }
}
