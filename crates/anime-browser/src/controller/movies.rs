//! Movie list page. A single unpaginated fetch.

use crate::error::ViewError;
use crate::request::{RequestTracker, Ticket};
use anime_api::{AnimeApi, ApiError};
use shared::{AnimeSummary, Movie};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct MovieController {
    movies: Vec<Movie>,
    loading: bool,
    error: Option<ViewError>,
    tracker: RequestTracker,
}

impl MovieController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    /// Movies projected onto the shared card shape
    pub fn cards(&self) -> Vec<AnimeSummary> {
        self.movies.iter().map(Movie::to_summary).collect()
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.error = None;
        self.tracker.issue()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Movie>, ApiError>) -> bool {
        if !self.tracker.is_current(ticket) {
            debug!(generation = ticket.generation(), "Dropping stale movie list");
            return false;
        }
        self.loading = false;

        match result {
            Ok(movies) => {
                info!(count = movies.len(), "Movies loaded");
                self.movies = movies;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load movies");
                self.movies.clear();
                self.error = Some(e.into());
            }
        }
        true
    }

    pub async fn mount<A: AnimeApi>(&mut self, api: &A) {
        let ticket = self.begin_load();
        let result = api.fetch_movies().await;
        self.finish_load(ticket, result);
    }

    pub async fn retry<A: AnimeApi>(&mut self, api: &A) {
        self.mount(api).await;
    }
}
