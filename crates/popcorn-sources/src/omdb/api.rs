use crate::error::{SourceError, GENERIC_FETCH_ERROR};
use popcorn_models::{MovieDetail, SearchResultItem};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "Runtime", default)]
    runtime: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: Option<String>,
    #[serde(rename = "Released", default)]
    released: Option<String>,
    #[serde(rename = "Actors", default)]
    actors: Option<String>,
    #[serde(rename = "Director", default)]
    director: Option<String>,
    #[serde(rename = "Genre", default)]
    genre: Option<String>,
}

/// OMDb fills unknown fields with "N/A"
fn present(value: Option<String>) -> String {
    match value {
        Some(v) if v != "N/A" => v,
        _ => String::new(),
    }
}

fn transport_error(context: &str, err: impl std::fmt::Display) -> SourceError {
    warn!("OMDb {} failed: {}", context, err);
    SourceError::transport(GENERIC_FETCH_ERROR)
}

async fn get_json<T>(client: &Client, base_url: &str, params: &[(&str, &str)], context: &str) -> Result<T, SourceError>
where
    T: for<'de> Deserialize<'de>,
{
    let response = client
        .get(base_url)
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| transport_error(context, e))?;

    if !response.status().is_success() {
        let status = response.status();
        return Err(transport_error(context, format!("HTTP {}", status)));
    }

    response.json::<T>().await.map_err(|e| transport_error(context, e))
}

/// Search titles by free text
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResultItem>, SourceError> {
    let body: OmdbSearchResponse =
        get_json(client, base_url, &[("apikey", api_key), ("s", query)], "search").await?;

    if body.response != "True" {
        debug!(query = %query, error = ?body.error, "OMDb search returned no match");
        return Err(SourceError::NotFound);
    }

    let items = body.search.ok_or(SourceError::NotFound)?;

    Ok(items
        .into_iter()
        .map(|item| SearchResultItem {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: present(Some(item.poster)),
        })
        .collect())
}

/// Fetch full details for a single IMDb id
pub async fn get_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: &str,
) -> Result<MovieDetail, SourceError> {
    let body: OmdbDetailResponse =
        get_json(client, base_url, &[("apikey", api_key), ("i", id)], "detail").await?;

    if body.response != "True" {
        debug!(imdb_id = %id, error = ?body.error, "OMDb detail returned no match");
        return Err(SourceError::NotFound);
    }

    let (imdb_id, title) = match (body.imdb_id, body.title) {
        (Some(imdb_id), Some(title)) => (imdb_id, title),
        _ => {
            warn!(imdb_id = %id, "OMDb detail response is missing imdbID or Title");
            return Err(SourceError::NotFound);
        }
    };

    let imdb_rating = body
        .imdb_rating
        .as_deref()
        .and_then(|r| r.trim().parse::<f64>().ok());

    Ok(MovieDetail {
        id: imdb_id,
        title,
        year: present(body.year),
        poster_url: present(body.poster),
        runtime_text: present(body.runtime),
        imdb_rating,
        plot: present(body.plot),
        released: present(body.released),
        actors: present(body.actors),
        director: present(body.director),
        genre: present(body.genre),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::omdb::OmdbClient;
    use crate::traits::MovieSource;
    use std::time::Duration;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OmdbClient {
        OmdbClient::new(format!("{}/", server.uri()), "test-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("apikey", "test-key"))
            .and(query_param("s", "inception"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": "True",
                "totalResults": "2",
                "Search": [
                    {"imdbID": "tt1375666", "Title": "Inception", "Year": "2010", "Poster": "https://example.com/i.jpg", "Type": "movie"},
                    {"imdbID": "tt5295894", "Title": "Inception: The Cobol Job", "Year": "2010", "Poster": "N/A", "Type": "movie"}
                ]
            })))
            .mount(&server)
            .await;

        let items = client_for(&server).search("inception").await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "tt1375666");
        assert_eq!(items[0].poster_url, "https://example.com/i.jpg");
        assert_eq!(items[1].poster_url, "");
    }

    #[tokio::test]
    async fn test_search_response_false_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": "False",
                "Error": "Movie not found!"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).search("Up2009").await.unwrap_err();
        assert_eq!(err, SourceError::NotFound);
        assert_eq!(err.to_string(), "Movie not found");
    }

    #[tokio::test]
    async fn test_search_http_error_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).search("inception").await.unwrap_err();
        assert_eq!(err, SourceError::Transport(GENERIC_FETCH_ERROR.to_string()));
    }

    #[tokio::test]
    async fn test_search_garbage_body_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).search("inception").await.unwrap_err();
        assert!(matches!(err, SourceError::Transport(_)));
    }

    #[tokio::test]
    async fn test_details_decodes_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("i", "tt1375666"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": "True",
                "imdbID": "tt1375666",
                "Title": "Inception",
                "Year": "2010",
                "Poster": "https://example.com/i.jpg",
                "Runtime": "148 min",
                "imdbRating": "8.8",
                "Plot": "A thief who steals corporate secrets through dream-sharing technology.",
                "Released": "16 Jul 2010",
                "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt",
                "Director": "Christopher Nolan",
                "Genre": "Action, Adventure, Sci-Fi"
            })))
            .mount(&server)
            .await;

        let detail = client_for(&server).details("tt1375666").await.unwrap();
        assert_eq!(detail.title, "Inception");
        assert_eq!(detail.imdb_rating, Some(8.8));
        assert_eq!(detail.runtime_minutes(), Some(148));
        assert_eq!(detail.director, "Christopher Nolan");
    }

    #[tokio::test]
    async fn test_details_not_available_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": "True",
                "imdbID": "tt0000001",
                "Title": "Carmencita",
                "Year": "1894",
                "Poster": "N/A",
                "Runtime": "N/A",
                "imdbRating": "N/A"
            })))
            .mount(&server)
            .await;

        let detail = client_for(&server).details("tt0000001").await.unwrap();
        assert_eq!(detail.imdb_rating, None);
        assert_eq!(detail.runtime_minutes(), None);
        assert_eq!(detail.poster_url, "");
        assert_eq!(detail.plot, "");
    }

    #[tokio::test]
    async fn test_details_wrong_id_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": "False",
                "Error": "Incorrect IMDb ID."
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).details("bogus").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(OmdbClient::new("https://www.omdbapi.com/", "  ", Duration::from_secs(5)).is_err());
    }
}
