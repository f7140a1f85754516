use super::progress::Spinner;
use super::prompts;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::PathManager;
use popcorn_core::{WatchedList, WatchedSummary};

pub async fn run_add(id: String, rating: Option<u8>, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let mut session = super::open_session(&config)?;

    session.select(&id);
    let spinner = Spinner::start(format!("Loading {}...", id), output);
    session.settle().await;
    spinner.finish();

    let movie = session
        .detail_state()
        .movie
        .clone()
        .ok_or_else(|| eyre!("Could not load details for {}", id))?;

    if let Some(existing) = session.watched().user_rating_for(&movie.id) {
        output.warn(format!("You already rated \"{}\" {} ⭐️", movie.title, existing));
        return Ok(());
    }

    let rating = match rating {
        Some(rating) => rating,
        None => prompts::prompt_rating(&movie.title)?,
    };

    if session.add_selected_to_watched(rating)? {
        output.success(format!("Added \"{}\" ({}) with your rating {}/10", movie.title, movie.year, rating));
    }

    Ok(())
}

pub async fn run_remove(id: String, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let store = super::watched_store(&config, &PathManager::default());

    let watched = WatchedList::from_entries(store.load(Vec::new())?);
    let Some(entry) = watched.get(&id) else {
        output.warn(format!("{} is not in your watched list", id));
        return Ok(());
    };
    let title = entry.title.clone();

    let next = watched.without(&id);
    store.save(next.entries())?;
    output.success(format!("Removed \"{}\" from your watched list", title));

    Ok(())
}

pub async fn run_watched(output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let store = super::watched_store(&config, &PathManager::default());

    let watched = WatchedList::from_entries(store.load(Vec::new())?);
    let summary = WatchedSummary::from_entries(watched.entries());

    output.watched(&watched, &summary);
    Ok(())
}
