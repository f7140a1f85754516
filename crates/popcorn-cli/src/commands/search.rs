use super::progress::Spinner;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::SearchView;

pub async fn run_search(query: String, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let mut session = super::open_session(&config)?;

    session.set_query(query.clone());
    let spinner = Spinner::start(format!("Searching for \"{}\"...", query.trim()), output);
    session.settle().await;
    spinner.finish();

    match session.search_view() {
        SearchView::Error(message) => {
            output.error(message);
        }
        SearchView::Results(items) => output.search_results(query.trim(), items),
        SearchView::Loading => {
            output.warn("Search did not finish");
        }
    }

    Ok(())
}

pub async fn run_show(id: String, full_plot: bool, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let mut session = super::open_session(&config)?;

    session.select(&id);
    let spinner = Spinner::start(format!("Loading {}...", id), output);
    session.settle().await;
    spinner.finish();

    let movie = session
        .detail_state()
        .movie
        .as_ref()
        .ok_or_else(|| eyre!("Could not load details for {}", id))?;
    let user_rating = session.watched().user_rating_for(&movie.id);

    output.movie(movie, user_rating, full_plot);
    Ok(())
}
