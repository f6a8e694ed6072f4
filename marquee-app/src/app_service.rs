//! AppService - owns the movie store and runs OMDb actions against it
//!
//! State lives in a `watch` channel so the presentation layer can subscribe to
//! snapshots. Mutations go through `send_modify` and never span an `.await`.
//!
//! Overlapping requests are sequenced per mode (listing vs. detail): each
//! request takes a ticket, and a response is applied only if its ticket is
//! still the newest one issued. The loading flag tracks every outstanding
//! request, stale or not, including ones whose futures were dropped.

use crate::display_types::{detail_from_omdb, movie_from_omdb};
use futures::future::join_all;
use marquee_core::omdb::{MovieApi, OmdbError};
use marquee_ui::stores::{MovieState, SortOrder};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub const FALLBACK_ERROR: &str = "An unexpected error occurred. Please try again.";

/// Message shown to the user for a failed request
fn error_message(err: &OmdbError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}

/// One outstanding request. Dropping it, whether the response arrived or the
/// action future was abandoned, releases its hold on the loading flag.
struct InFlight<'a> {
    service: &'a AppService,
    counter: &'a AtomicU64,
    ticket: u64,
}

impl InFlight<'_> {
    fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.ticket
    }

    /// Apply the response if no newer request of the same mode was issued.
    fn finish(self, apply: impl FnOnce(&mut MovieState)) {
        if self.is_current() {
            self.service.state.send_modify(apply);
        } else {
            debug!("Dropping stale response (ticket {})", self.ticket);
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let in_flight = &self.service.in_flight;
        self.service.state.send_modify(|state| {
            let remaining = in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
            state.loading = remaining > 0;
        });
    }
}

pub struct AppService {
    state: watch::Sender<MovieState>,
    api: Arc<dyn MovieApi>,
    popular_term: String,
    list_ticket: AtomicU64,
    detail_ticket: AtomicU64,
    in_flight: AtomicUsize,
}

impl AppService {
    pub fn new(api: Arc<dyn MovieApi>, popular_term: impl Into<String>) -> Self {
        Self {
            state: watch::Sender::new(MovieState::default()),
            api,
            popular_term: popular_term.into(),
            list_ticket: AtomicU64::new(0),
            detail_ticket: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MovieState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> MovieState {
        self.state.borrow().clone()
    }

    // =========================================================================
    // Request bookkeeping
    // =========================================================================

    /// Take a fresh ticket, superseding earlier requests of the same mode.
    fn begin_request<'a>(&'a self, counter: &'a AtomicU64, clear_error: bool) -> InFlight<'a> {
        let ticket = counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.track(counter, ticket, clear_error)
    }

    fn track<'a>(&'a self, counter: &'a AtomicU64, ticket: u64, clear_error: bool) -> InFlight<'a> {
        self.state.send_modify(|state| {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
            if clear_error {
                state.error = None;
            }
        });
        InFlight {
            service: self,
            counter,
            ticket,
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Run a listing search and replace the results with its first page.
    async fn fetch_movies(&self, term: &str) {
        let request = self.begin_request(&self.list_ticket, true);
        let result = self.api.search(term).await;
        request.finish(|state| match result {
            Ok(page) => {
                info!("Loaded {} movie(s) for '{}'", page.movies.len(), term);
                state.movies = page.movies.into_iter().map(movie_from_omdb).collect();
                state.total_results = page.total_results;
                state.results_hidden = false;
            }
            Err(e) => {
                warn!("Search for '{}' failed: {}", term, e);
                state.error = Some(error_message(&e));
                state.movies.clear();
                state.total_results = 0;
            }
        });
    }

    /// Search by free text. A blank query resets to the welcome state
    /// without touching the network.
    pub async fn search_movies(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            // Supersede any listing still in flight
            self.list_ticket.fetch_add(1, Ordering::SeqCst);
            self.state.send_modify(MovieState::reset_search);
            return;
        }
        self.state
            .send_modify(|state| state.search_query = query.to_string());
        self.fetch_movies(query).await;
    }

    /// OMDb has no trending endpoint, so "popular" is a fixed search term.
    pub async fn get_popular_movies(&self) {
        self.state.send_modify(|state| state.search_query.clear());
        let term = self.popular_term.clone();
        self.fetch_movies(&term).await;
    }

    /// Load the full record for one movie into `selected_movie`.
    /// Leaves the result list alone.
    pub async fn get_movie_details(&self, imdb_id: &str) {
        let request = self.begin_request(&self.detail_ticket, false);
        let result = self.api.movie_details(imdb_id).await;
        request.finish(|state| match result {
            Ok(detail) => state.selected_movie = Some(detail_from_omdb(detail)),
            Err(e) => {
                error!("Error fetching movie details for {}: {}", imdb_id, e);
                state.error = Some(error_message(&e));
                state.selected_movie = None;
            }
        });
    }

    /// Fill in genres (and ratings) for the current results.
    ///
    /// Search pages never carry `Genre`, so the genre list and genre filter
    /// need one detail lookup per result. Lookups that fail leave that result
    /// untouched and do not set the shared error. Results replaced by a newer
    /// listing while lookups are running are left alone.
    pub async fn load_genres(&self) {
        let ids: BTreeSet<String> = self
            .state
            .borrow()
            .movies
            .iter()
            .filter(|m| m.genre.is_none())
            .map(|m| m.id.clone())
            .collect();
        if ids.is_empty() {
            return;
        }
        let ticket = self.list_ticket.load(Ordering::SeqCst);
        let request = self.track(&self.list_ticket, ticket, false);
        info!("Looking up genres for {} movie(s)", ids.len());

        let lookups = ids.into_iter().map(|id| async move {
            let result = self.api.movie_details(&id).await;
            (id, result)
        });
        let details: HashMap<String, _> = join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(detail) => Some((id, detail)),
                Err(e) => {
                    warn!("Genre lookup for {} failed: {}", id, e);
                    None
                }
            })
            .collect();

        request.finish(|state| {
            for movie in state.movies.iter_mut() {
                if let Some(detail) = details.get(&movie.id) {
                    movie.genre = detail.movie.genre.clone();
                    if movie.rating.is_none() {
                        movie.rating = detail.movie.imdb_rating.clone();
                    }
                }
            }
        });
    }

    // =========================================================================
    // Filter & sort preferences
    // =========================================================================

    pub fn set_sort_order(&self, order: SortOrder) {
        self.state.send_modify(|state| state.sort_order = order);
    }

    pub fn set_movie_year(&self, year: impl Into<String>) {
        let year = year.into();
        self.state.send_modify(|state| state.movie_year = year);
    }

    pub fn set_selected_genre(&self, genre: impl Into<String>) {
        let genre = genre.into();
        self.state.send_modify(|state| state.selected_genre = genre);
    }

    pub fn set_movie_type(&self, movie_type: impl Into<String>) {
        let movie_type = movie_type.into();
        self.state.send_modify(|state| state.movie_type = movie_type);
    }
}
