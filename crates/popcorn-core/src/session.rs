//! Search-and-selection state machine.
//!
//! A [`MovieSession`] owns every piece of browse state and is the only thing that mutates it.
//! Fetches run on spawned tasks and report back through an internal channel; the owner
//! pulls completions with [`MovieSession::next_event`] and feeds them to
//! [`MovieSession::apply`], so state changes stay serialized on one task.
//!
//! Each fetch kind has a [`RequestSlot`]. Starting a fetch cancels the previous one in the
//! same slot, and a completion is only applied when its generation is still current, so a
//! slow response for an old query can never overwrite a newer one.

use crate::detail::{DetailState, NoopHooks, ViewHooks};
use crate::error::SessionError;
use crate::request::{RequestSlot, RequestTicket};
use crate::search::{SearchState, SearchView};
use crate::store::PersistentList;
use crate::summary::WatchedSummary;
use crate::watched::WatchedList;
use popcorn_config::Config;
use popcorn_models::{MovieDetail, SearchResultItem, WatchedEntry};
use popcorn_sources::{MovieSource, SourceError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub min_query_length: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { min_query_length: 3 }
    }
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_query_length: config.search.min_query_length,
        }
    }
}

/// Completion posted by a fetch task
#[derive(Debug)]
pub enum SessionEvent {
    SearchCompleted {
        generation: u64,
        query: String,
        outcome: Result<Vec<SearchResultItem>, SourceError>,
    },
    DetailCompleted {
        generation: u64,
        id: String,
        outcome: Result<MovieDetail, SourceError>,
    },
}

/// What [`MovieSession::apply`] did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Search,
    Detail,
    Stale,
}

pub struct MovieSession<S: MovieSource + 'static> {
    source: Arc<S>,
    options: SessionOptions,
    search: SearchState,
    detail: DetailState,
    search_slot: RequestSlot,
    detail_slot: RequestSlot,
    watched: WatchedList,
    watched_store: PersistentList<WatchedEntry>,
    hooks: Box<dyn ViewHooks>,
    detail_entered: bool,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl<S: MovieSource + 'static> MovieSession<S> {
    /// Open a session, loading the watched list from `watched_store`
    pub fn new(
        source: Arc<S>,
        watched_store: PersistentList<WatchedEntry>,
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        let stored = watched_store.load(Vec::new())?;
        let stored_len = stored.len();
        let watched = WatchedList::from_entries(stored);
        if watched.len() != stored_len {
            warn!(
                "Dropped {} duplicate watched entries from '{}'",
                stored_len - watched.len(),
                watched_store.key()
            );
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            source,
            options,
            search: SearchState::default(),
            detail: DetailState::default(),
            search_slot: RequestSlot::new(),
            detail_slot: RequestSlot::new(),
            watched,
            watched_store,
            hooks: Box::new(NoopHooks),
            detail_entered: false,
            events_tx,
            events_rx,
        })
    }

    pub fn with_hooks(mut self, hooks: Box<dyn ViewHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn search_view(&self) -> SearchView<'_> {
        self.search.view()
    }

    pub fn detail_state(&self) -> &DetailState {
        &self.detail
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.search.selected_id.as_deref()
    }

    pub fn watched(&self) -> &WatchedList {
        &self.watched
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_entries(self.watched.entries())
    }

    /// True while a search or detail fetch has not settled
    pub fn is_busy(&self) -> bool {
        self.search_slot.in_flight() || self.detail_slot.in_flight()
    }

    /// React to a new query. Cancels any search still in flight.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.search.query = query.clone();

        if self.search_slot.cancel() {
            debug!("Cancelled in-flight search");
        }

        let trimmed = query.trim();
        if trimmed.chars().count() < self.options.min_query_length {
            debug!(query = %query, "Query too short, not searching");
            self.search.reject_short_query(self.options.min_query_length);
            return;
        }

        // A new search replaces whatever detail view was open
        self.close_detail();
        self.search.begin_search();

        let ticket = self.search_slot.begin();
        self.spawn_search(ticket, trimmed.to_string());
    }

    /// Toggle selection of a result. Selecting the open id again closes it.
    pub fn select(&mut self, id: &str) {
        if self.search.selected_id.as_deref() == Some(id) {
            self.close_detail();
            return;
        }

        self.leave_detail_view();
        self.search.selected_id = Some(id.to_string());
        self.detail = DetailState {
            movie: None,
            is_loading: true,
        };

        let ticket = self.detail_slot.begin();
        self.spawn_detail(ticket, id.to_string());
    }

    pub fn close_detail(&mut self) {
        if self.detail_slot.cancel() {
            debug!("Cancelled in-flight detail fetch");
        }
        self.search.selected_id = None;
        self.detail = DetailState::default();
        self.leave_detail_view();
    }

    /// Wait for the next fetch completion
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.recv().await
    }

    pub fn apply(&mut self, event: SessionEvent) -> Applied {
        match event {
            SessionEvent::SearchCompleted { generation, query, outcome } => {
                if !self.search_slot.finish(generation) {
                    debug!(query = %query, generation = generation, "Discarding stale search response");
                    return Applied::Stale;
                }

                match &outcome {
                    Ok(items) => info!(query = %query, count = items.len(), "Search completed"),
                    Err(SourceError::NotFound) => info!(query = %query, "Search found nothing"),
                    Err(e) => warn!(query = %query, error = %e, "Search failed"),
                }
                self.search.apply_outcome(outcome);
                Applied::Search
            }
            SessionEvent::DetailCompleted { generation, id, outcome } => {
                if !self.detail_slot.finish(generation) || self.search.selected_id.as_deref() != Some(id.as_str()) {
                    debug!(imdb_id = %id, generation = generation, "Discarding stale detail response");
                    return Applied::Stale;
                }

                self.detail.is_loading = false;
                match outcome {
                    Ok(movie) => {
                        debug!(imdb_id = %id, title = %movie.title, "Detail loaded");
                        self.hooks.on_enter_detail(&movie.title);
                        self.detail_entered = true;
                        self.detail.movie = Some(movie);
                    }
                    Err(e) => {
                        // A failed lookup just drops back to the list
                        warn!(imdb_id = %id, error = %e, "Detail fetch failed, clearing selection");
                        self.search.selected_id = None;
                        self.detail = DetailState::default();
                    }
                }
                Applied::Detail
            }
        }
    }

    /// Apply completions until nothing is in flight
    pub async fn settle(&mut self) {
        while self.is_busy() {
            match self.events_rx.recv().await {
                Some(event) => {
                    self.apply(event);
                }
                None => break,
            }
        }
    }

    /// Add the open movie to the watched list with the user's rating, then close it.
    ///
    /// Returns false when the movie was already watched; the list is left unchanged.
    pub fn add_selected_to_watched(&mut self, user_rating: u8) -> Result<bool, SessionError> {
        if user_rating > 10 {
            return Err(SessionError::InvalidRating(user_rating));
        }
        let movie = self.detail.movie.as_ref().ok_or(SessionError::NoMovieSelected)?;
        let entry = WatchedEntry::from_detail(movie, user_rating);

        let added = if self.watched.contains(&entry.id) {
            debug!(imdb_id = %entry.id, "Already in watched list");
            false
        } else {
            let id = entry.id.clone();
            let next = self.watched.with_added(entry);
            self.watched_store.save(next.entries())?;
            self.watched = next;
            info!(imdb_id = %id, rating = user_rating, "Added to watched list");
            true
        };

        self.close_detail();
        Ok(added)
    }

    /// Remove by id. Returns false when the id was not in the list.
    pub fn remove_watched(&mut self, id: &str) -> Result<bool, SessionError> {
        if !self.watched.contains(id) {
            return Ok(false);
        }
        let next = self.watched.without(id);
        self.watched_store.save(next.entries())?;
        self.watched = next;
        info!(imdb_id = %id, "Removed from watched list");
        Ok(true)
    }

    /// Cancel all fetches and leave any open detail view. Also runs on drop.
    pub fn shutdown(&mut self) {
        self.search_slot.cancel();
        self.detail_slot.cancel();
        self.leave_detail_view();
    }

    fn leave_detail_view(&mut self) {
        if self.detail_entered {
            self.detail_entered = false;
            self.hooks.on_leave_detail();
        }
    }

    fn spawn_search(&self, ticket: RequestTicket, query: String) {
        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = ticket.token.cancelled() => None,
                outcome = source.search(&query) => Some(outcome),
            };

            match outcome {
                Some(outcome) => {
                    let _ = tx.send(SessionEvent::SearchCompleted {
                        generation: ticket.generation,
                        query,
                        outcome,
                    });
                }
                None => debug!(query = %query, "Search request cancelled"),
            }
        });
    }

    fn spawn_detail(&self, ticket: RequestTicket, id: String) {
        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = ticket.token.cancelled() => None,
                outcome = source.details(&id) => Some(outcome),
            };

            match outcome {
                Some(outcome) => {
                    let _ = tx.send(SessionEvent::DetailCompleted {
                        generation: ticket.generation,
                        id,
                        outcome,
                    });
                }
                None => debug!(imdb_id = %id, "Detail request cancelled"),
            }
        });
    }
}

impl<S: MovieSource + 'static> Drop for MovieSession<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
