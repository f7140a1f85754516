use crate::commands::render;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use popcorn_core::{WatchedList, WatchedSummary};
use popcorn_models::{Conversion, MovieDetail, SearchResultItem};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "success",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors should always be shown, even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "🚫".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "error",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "info",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "warning",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    /// Plain line in human mode; nothing in JSON mode, where data goes through [`Output::json`]
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{}", msg.as_ref());
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    /// Result list for one query: numbered table, or `{query, results}`
    pub fn search_results(&self, query: &str, items: &[SearchResultItem]) {
        if self.is_human() {
            if self.quiet {
                return;
            }
            println!("Found {} results", items.len());
            if !items.is_empty() {
                println!("{}", render::results_table(items));
            }
        } else {
            self.json(&results_json(query, items));
        }
    }

    /// One movie, with the rating already given when it is on the watched list
    pub fn movie(&self, movie: &MovieDetail, user_rating: Option<u8>, full_plot: bool) {
        if self.is_human() {
            if self.quiet {
                return;
            }
            for line in render::detail_lines(movie, user_rating, full_plot) {
                println!("{}", line);
            }
        } else {
            self.json(&json!({
                "movie": movie,
                "user_rating": user_rating,
            }));
        }
    }

    /// Averages line followed by the watched table
    pub fn watched(&self, watched: &WatchedList, summary: &WatchedSummary) {
        if self.is_human() {
            if self.quiet {
                return;
            }
            println!("{}", render::summary_line(summary));
            if watched.is_empty() {
                println!("\nNothing watched yet. Try 'popcorn add <imdb-id>'.");
            } else {
                println!("{}", render::watched_table(watched));
            }
        } else {
            self.json(&watched_json(watched, summary));
        }
    }

    pub fn conversion(&self, conversion: &Conversion) {
        if self.is_human() {
            self.success(format!(
                "{} {} = {:.2} {}",
                conversion.amount, conversion.from, conversion.result, conversion.to
            ));
        } else {
            self.json(&json!(conversion));
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}

fn results_json(query: &str, items: &[SearchResultItem]) -> serde_json::Value {
    json!({
        "query": query,
        "count": items.len(),
        "results": items,
    })
}

fn watched_json(watched: &WatchedList, summary: &WatchedSummary) -> serde_json::Value {
    json!({
        "summary": summary,
        "watched": watched.entries(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use popcorn_models::WatchedEntry;

    #[test]
    fn test_results_json_shape() {
        let items = vec![SearchResultItem {
            id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster_url: String::new(),
        }];
        let value = results_json("inception", &items);
        assert_eq!(value["query"], "inception");
        assert_eq!(value["count"], 1);
        assert_eq!(value["results"][0]["title"], "Inception");
    }

    #[test]
    fn test_watched_json_uses_stored_field_names() {
        let watched = WatchedList::from_entries(vec![WatchedEntry {
            id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster_url: String::new(),
            user_rating: 9,
            imdb_rating: 8.8,
            runtime_minutes: 148,
        }]);
        let summary = WatchedSummary::from_entries(watched.entries());
        let value = watched_json(&watched, &summary);
        assert_eq!(value["summary"]["count"], 1);
        assert_eq!(value["watched"][0]["imdbID"], "tt1375666");
        assert_eq!(value["watched"][0]["runtime"], 148);
    }
}
