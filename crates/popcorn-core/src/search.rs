use popcorn_models::SearchResultItem;
use popcorn_sources::SourceError;

pub fn short_query_message(min_query_length: usize) -> String {
    format!("Type at least {} letters in search bar", min_query_length)
}

/// State behind the search box and result list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResultItem>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub selected_id: Option<String>,
}

/// What the result panel shows. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    Loading,
    Error(&'a str),
    Results(&'a [SearchResultItem]),
}

impl SearchState {
    pub fn reject_short_query(&mut self, min_query_length: usize) {
        self.error = Some(short_query_message(min_query_length));
        self.results.clear();
        self.is_loading = false;
    }

    pub fn begin_search(&mut self) {
        self.error = None;
        self.is_loading = true;
    }

    pub fn apply_outcome(&mut self, outcome: Result<Vec<SearchResultItem>, SourceError>) {
        match outcome {
            Ok(items) => {
                self.results = items;
                self.error = None;
            }
            Err(e) => {
                self.results.clear();
                self.error = Some(e.to_string());
            }
        }
        self.is_loading = false;
    }

    pub fn view(&self) -> SearchView<'_> {
        if let Some(error) = &self.error {
            SearchView::Error(error)
        } else if self.is_loading {
            SearchView::Loading
        } else {
            SearchView::Results(&self.results)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> SearchResultItem {
        SearchResultItem {
            id: id.to_string(),
            title: format!("Movie {}", id),
            year: "2020".to_string(),
            poster_url: String::new(),
        }
    }

    #[test]
    fn test_short_query_clears_results() {
        let mut state = SearchState {
            results: vec![item("tt001")],
            is_loading: true,
            ..SearchState::default()
        };
        state.reject_short_query(3);

        assert_eq!(state.error.as_deref(), Some("Type at least 3 letters in search bar"));
        assert!(state.results.is_empty());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_outcome_settles_loading() {
        let mut state = SearchState::default();
        state.begin_search();
        assert_eq!(state.view(), SearchView::Loading);

        state.apply_outcome(Ok(vec![item("tt001"), item("tt002")]));
        assert!(!state.is_loading);
        assert!(matches!(state.view(), SearchView::Results(r) if r.len() == 2));

        state.begin_search();
        state.apply_outcome(Err(SourceError::NotFound));
        assert!(!state.is_loading);
        assert!(state.results.is_empty());
        assert_eq!(state.view(), SearchView::Error("Movie not found"));
    }

    #[test]
    fn test_error_wins_over_results() {
        let state = SearchState {
            results: vec![item("tt001")],
            error: Some("boom".to_string()),
            ..SearchState::default()
        };
        assert_eq!(state.view(), SearchView::Error("boom"));
    }
}
