//! Search page.
//!
//! The controller projects the route's `q`/`page` into a fetch. It never
//! changes query or page on its own; user actions produce a new [`Route`] that
//! the caller navigates to, and the next sync picks it up.

use crate::error::ViewError;
use crate::request::{RequestTracker, Ticket};
use crate::route::Route;
use anime_api::{AnimeApi, ApiError};
use shared::{AnimeSummary, SearchPage};
use tracing::{debug, info, warn};

/// An issued search
#[derive(Debug, Clone)]
pub struct SearchRequest {
    ticket: Ticket,
    pub query: String,
    pub page: u32,
}

#[derive(Debug)]
pub struct SearchController {
    /// Text in the search box; not searched until submitted
    input: String,
    query: String,
    page: u32,
    items: Vec<AnimeSummary>,
    total_pages: u32,
    total_results: u32,
    loading: bool,
    error: Option<ViewError>,
    tracker: RequestTracker,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            query: String::new(),
            page: 1,
            items: Vec::new(),
            total_pages: 1,
            total_results: 0,
            loading: false,
            error: None,
            tracker: RequestTracker::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn items(&self) -> &[AnimeSummary] {
        &self.items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_results(&self) -> u32 {
        self.total_results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    /// Edit the search box. Never triggers a fetch.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// Route for submitting the search box; `None` for blank input.
    ///
    /// A new search always starts at page 1.
    pub fn submit(&self) -> Option<Route> {
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }
        Some(Route::search(text, 1))
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Pagination controls are shown only for multi-page results
    pub fn shows_pagination(&self) -> bool {
        !self.query.is_empty() && !self.items.is_empty() && self.total_pages > 1
    }

    pub fn previous_page(&self) -> Option<Route> {
        self.can_go_previous()
            .then(|| Route::search(&self.query, self.page - 1))
    }

    pub fn next_page(&self) -> Option<Route> {
        self.can_go_next()
            .then(|| Route::search(&self.query, self.page + 1))
    }

    /// Take `q`/`page` from the route. Returns the fetch to run, if any.
    ///
    /// An empty query clears the results without a request.
    pub fn begin_sync(&mut self, query: &str, page: u32) -> Option<SearchRequest> {
        if query != self.query {
            self.input = query.to_string();
        }
        self.query = query.to_string();
        self.page = page.max(1);
        self.error = None;

        if query.trim().is_empty() {
            self.tracker.invalidate();
            self.items.clear();
            self.total_pages = 1;
            self.total_results = 0;
            self.loading = false;
            return None;
        }

        self.loading = true;
        Some(SearchRequest {
            ticket: self.tracker.issue(),
            query: self.query.clone(),
            page: self.page,
        })
    }

    /// Apply a search result. Returns false if the request was superseded.
    pub fn finish(&mut self, request: SearchRequest, result: Result<SearchPage, ApiError>) -> bool {
        if !self.tracker.is_current(request.ticket) {
            debug!(
                query = %request.query,
                page = request.page,
                generation = request.ticket.generation(),
                "Dropping stale search result"
            );
            return false;
        }
        self.loading = false;

        match result {
            Ok(found) => {
                info!(
                    query = %request.query,
                    page = request.page,
                    results = found.results.len(),
                    total = found.pagination.total,
                    "Search complete"
                );
                self.items = found.results;
                self.total_pages = found.pagination.total_pages.max(1);
                self.total_results = found.pagination.total;
            }
            Err(e) => {
                warn!(query = %request.query, error = %e, "Search failed");
                self.items.clear();
                self.total_pages = 1;
                self.total_results = 0;
                self.error = Some(e.into());
            }
        }
        true
    }

    pub async fn sync<A: AnimeApi>(&mut self, api: &A, query: &str, page: u32) {
        if let Some(request) = self.begin_sync(query, page) {
            let result = api.search(&request.query, request.page).await;
            self.finish(request, result);
        }
    }

    /// Sync from a route; non-search routes are ignored
    pub async fn sync_route<A: AnimeApi>(&mut self, api: &A, route: &Route) {
        if let Route::Search { query, page } = route {
            self.sync(api, query, *page).await;
        }
    }
}
