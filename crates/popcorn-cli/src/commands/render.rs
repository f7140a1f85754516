use crate::expander::{collapse_words, COLLAPSED_WORDS};
use comfy_table::{Attribute, Cell, Color, Table};
use popcorn_core::{WatchedList, WatchedSummary};
use popcorn_models::{MovieDetail, SearchResultItem};

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

/// Numbered result list; the numbers are what `:open` takes in browse mode
pub fn results_table(items: &[SearchResultItem]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("#"), header("Title"), header("🗓 Year"), header("IMDb id")]);
    for (index, item) in items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.title),
            Cell::new(&item.year),
            Cell::new(&item.id),
        ]);
    }
    table
}

pub fn watched_table(watched: &WatchedList) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        header("Title"),
        header("⭐️ IMDb"),
        header("🌟 Yours"),
        header("⏳ Runtime"),
        header("IMDb id"),
    ]);
    for entry in watched.entries() {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(entry.imdb_rating),
            Cell::new(entry.user_rating),
            Cell::new(format!("{} min", entry.runtime_minutes)),
            Cell::new(&entry.id),
        ]);
    }
    table
}

pub fn summary_line(summary: &WatchedSummary) -> String {
    let noun = if summary.count == 1 { "movie" } else { "movies" };
    format!(
        "#️⃣ {} {}   ⭐️ {}   🌟 {}   ⏳ {} min",
        summary.count, noun, summary.avg_imdb_rating, summary.avg_user_rating, summary.avg_runtime
    )
}

/// Text block for one movie. `user_rating` is the rating already given, if the movie is watched.
pub fn detail_lines(movie: &MovieDetail, user_rating: Option<u8>, full_plot: bool) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", movie.title, movie.year)];

    let mut facts = Vec::new();
    if !movie.released.is_empty() {
        facts.push(movie.released.clone());
    }
    if !movie.runtime_text.is_empty() {
        facts.push(movie.runtime_text.clone());
    }
    if !facts.is_empty() {
        lines.push(facts.join(" • "));
    }
    if !movie.genre.is_empty() {
        lines.push(movie.genre.clone());
    }
    match movie.imdb_rating {
        Some(rating) => lines.push(format!("⭐️ {} IMDb rating", rating)),
        None => lines.push("⭐️ No IMDb rating".to_string()),
    }

    match user_rating {
        Some(rating) => lines.push(format!("You rated this movie {} ⭐️", rating)),
        None => lines.push("Not in your watched list yet".to_string()),
    }

    if !movie.plot.is_empty() {
        let plot = if full_plot {
            movie.plot.clone()
        } else {
            collapse_words(&movie.plot, COLLAPSED_WORDS)
        };
        lines.push(String::new());
        lines.push(plot);
    }
    if !movie.actors.is_empty() {
        lines.push(format!("Starring {}", movie.actors));
    }
    if !movie.director.is_empty() {
        lines.push(format!("Directed by {}", movie.director));
    }

    lines
}
