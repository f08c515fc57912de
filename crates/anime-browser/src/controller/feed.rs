//! Home and latest-releases feeds.

use crate::error::ViewError;
use crate::request::{RequestTracker, Ticket};
use anime_api::{AnimeApi, ApiError};
use shared::config::BrowserConfig;
use shared::AnimeSummary;
use tracing::{debug, info, warn};

/// Which page the feed backs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    /// Home page: also keeps a featured strip from page 1
    Home,
    Latest,
}

/// An issued page fetch
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    ticket: Ticket,
    pub page: u32,
}

/// Paginated feed of the latest releases
#[derive(Debug)]
pub struct FeedController {
    kind: FeedKind,
    page_size: usize,
    featured_count: usize,
    items: Vec<AnimeSummary>,
    featured: Vec<AnimeSummary>,
    page: u32,
    loading: bool,
    has_more: bool,
    error: Option<ViewError>,
    tracker: RequestTracker,
}

impl FeedController {
    pub fn new(kind: FeedKind, settings: &BrowserConfig) -> Self {
        Self {
            kind,
            page_size: settings.page_size.max(1),
            featured_count: settings.featured_count,
            items: Vec::new(),
            featured: Vec::new(),
            page: 1,
            loading: false,
            has_more: true,
            error: None,
            tracker: RequestTracker::new(),
        }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn items(&self) -> &[AnimeSummary] {
        &self.items
    }

    pub fn featured(&self) -> &[AnimeSummary] {
        &self.featured
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    /// Whether the load-more action is available
    pub fn can_load_more(&self) -> bool {
        !self.loading && self.has_more
    }

    /// Start over from page 1 with an empty list.
    ///
    /// Used for both the initial mount and refresh, so both end in the same
    /// state. Anything still in flight is superseded.
    pub fn begin_refresh(&mut self) -> PageRequest {
        self.page = 1;
        self.items.clear();
        self.has_more = true;
        self.error = None;
        self.loading = true;
        PageRequest {
            ticket: self.tracker.issue(),
            page: 1,
        }
    }

    /// Request the page after the last one loaded; `None` while loading or
    /// when nothing is left. `page()` only moves once the page arrives.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if !self.can_load_more() {
            debug!(page = self.page, loading = self.loading, "Load more ignored");
            return None;
        }
        self.error = None;
        self.loading = true;
        Some(PageRequest {
            ticket: self.tracker.issue(),
            page: self.page + 1,
        })
    }

    /// Apply a page fetch result. Returns false if the request was superseded.
    pub fn finish(&mut self, request: PageRequest, result: Result<Vec<AnimeSummary>, ApiError>) -> bool {
        if !self.tracker.is_current(request.ticket) {
            debug!(
                page = request.page,
                generation = request.ticket.generation(),
                "Dropping stale feed page"
            );
            return false;
        }
        self.loading = false;

        match result {
            Ok(fetched) => {
                info!(page = request.page, count = fetched.len(), "Feed page loaded");
                self.has_more = fetched.len() >= self.page_size;
                self.page = request.page;
                if request.page == 1 {
                    if self.kind == FeedKind::Home {
                        self.featured = fetched.iter().take(self.featured_count).cloned().collect();
                    }
                    self.items = fetched;
                } else {
                    self.items.extend(fetched);
                }
            }
            Err(e) => {
                // Page stays at the last one loaded, so a retry asks for the same page
                warn!(page = request.page, error = %e, "Failed to load feed page");
                self.error = Some(e.into());
            }
        }
        true
    }

    pub async fn mount<A: AnimeApi>(&mut self, api: &A) {
        self.refresh(api).await;
    }

    pub async fn refresh<A: AnimeApi>(&mut self, api: &A) {
        let request = self.begin_refresh();
        let result = api.fetch_latest(request.page).await;
        self.finish(request, result);
    }

    /// Fetch and append the next page. No-op while loading or at the end.
    pub async fn load_more<A: AnimeApi>(&mut self, api: &A) {
        if let Some(request) = self.begin_load_more() {
            let result = api.fetch_latest(request.page).await;
            self.finish(request, result);
        }
    }

    /// Re-run whatever failed: the first page or the next page
    pub async fn retry<A: AnimeApi>(&mut self, api: &A) {
        if self.items.is_empty() {
            self.refresh(api).await;
        } else {
            self.load_more(api).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{summaries, Call, FakeApi};

    fn settings() -> BrowserConfig {
        BrowserConfig::default()
    }

    fn ids(items: &[AnimeSummary]) -> Vec<String> {
        items.iter().map(|a| a.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_mount_loads_first_page() {
        let api = FakeApi::new().with_latest(20, 2, 7);
        let mut feed = FeedController::new(FeedKind::Latest, &settings());

        feed.mount(&api).await;

        assert_eq!(feed.items().len(), 20);
        assert_eq!(feed.page(), 1);
        assert!(!feed.is_loading());
        assert!(feed.has_more());
        assert!(feed.featured().is_empty());
        assert_eq!(api.calls(), vec![Call::Latest(1)]);
    }

    #[tokio::test]
    async fn test_load_more_appends_until_short_page() {
        let api = FakeApi::new().with_latest(20, 2, 7);
        let mut feed = FeedController::new(FeedKind::Latest, &settings());

        feed.mount(&api).await;
        feed.load_more(&api).await;
        assert_eq!(feed.items().len(), 40);
        assert_eq!(feed.page(), 2);
        assert!(feed.has_more());

        feed.load_more(&api).await;
        assert_eq!(feed.items().len(), 47);
        assert_eq!(feed.page(), 3);
        assert!(!feed.has_more());

        // Nothing left: no request, no page change
        feed.load_more(&api).await;
        assert_eq!(feed.page(), 3);
        assert_eq!(
            api.calls(),
            vec![Call::Latest(1), Call::Latest(2), Call::Latest(3)]
        );

        // Appended, never replaced
        assert_eq!(feed.items()[0].id, "1-0");
        assert_eq!(feed.items()[20].id, "2-0");
        assert_eq!(feed.items()[40].id, "3-0");
    }

    #[tokio::test]
    async fn test_load_more_while_loading_is_noop() {
        let api = FakeApi::new().with_latest(20, 3, 0);
        let mut feed = FeedController::new(FeedKind::Latest, &settings());
        feed.mount(&api).await;

        let first = feed.begin_load_more().expect("load more available");
        assert_eq!(first.page, 2);
        assert!(feed.is_loading());
        assert!(feed.begin_load_more().is_none());
        assert_eq!(feed.page(), 1);

        assert!(feed.finish(first, Ok(summaries(2, 20))));
        assert_eq!(feed.page(), 2);
        assert_eq!(feed.items().len(), 40);
    }

    #[tokio::test]
    async fn test_refresh_matches_fresh_mount() {
        let api = FakeApi::new().with_latest(20, 3, 4);
        let mut fresh = FeedController::new(FeedKind::Home, &settings());
        fresh.mount(&api).await;

        let mut used = FeedController::new(FeedKind::Home, &settings());
        used.mount(&api).await;
        used.load_more(&api).await;
        used.load_more(&api).await;
        assert_eq!(used.items().len(), 60);

        used.refresh(&api).await;
        assert_eq!(ids(used.items()), ids(fresh.items()));
        assert_eq!(ids(used.featured()), ids(fresh.featured()));
        assert_eq!(used.page(), fresh.page());
        assert_eq!(used.has_more(), fresh.has_more());
        assert_eq!(used.is_loading(), fresh.is_loading());
    }

    #[tokio::test]
    async fn test_home_featured_computed_from_first_page_only() {
        let api = FakeApi::new().with_latest(20, 2, 3);
        let mut home = FeedController::new(FeedKind::Home, &settings());

        home.mount(&api).await;
        let featured = ids(home.featured());
        assert_eq!(featured, vec!["1-0", "1-1", "1-2", "1-3", "1-4"]);

        home.load_more(&api).await;
        assert_eq!(ids(home.featured()), featured);
    }

    #[tokio::test]
    async fn test_short_first_page_has_no_more() {
        let api = FakeApi::new().with_latest(20, 0, 12);
        let mut feed = FeedController::new(FeedKind::Latest, &settings());
        feed.mount(&api).await;

        assert_eq!(feed.items().len(), 12);
        assert!(!feed.has_more());
        assert!(!feed.can_load_more());
    }

    #[tokio::test]
    async fn test_refresh_supersedes_pending_load_more() {
        let api = FakeApi::new().with_latest(20, 3, 0);
        let mut feed = FeedController::new(FeedKind::Latest, &settings());
        feed.mount(&api).await;

        let stale = feed.begin_load_more().unwrap();
        let fresh = feed.begin_refresh();

        assert!(feed.finish(fresh, Ok(summaries(1, 20))));
        assert!(!feed.finish(stale, Ok(summaries(2, 20))));
        assert_eq!(feed.items().len(), 20);
        assert_eq!(feed.page(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_more_keeps_page() {
        let api = FakeApi::new().with_latest(20, 3, 0);
        let mut feed = FeedController::new(FeedKind::Latest, &settings());
        feed.mount(&api).await;

        // Never moves backwards: in flight, failed, retried
        let mut seen = vec![feed.page()];
        api.fail(Some(500));
        let pending = feed.begin_load_more().unwrap();
        seen.push(feed.page());
        let result = api.fetch_latest(pending.page).await;
        feed.finish(pending, result);
        seen.push(feed.page());
        assert_eq!(seen, vec![1, 1, 1]);
        assert_eq!(feed.items().len(), 20);
        assert!(feed.error().is_some_and(ViewError::is_network));

        api.fail(None);
        feed.retry(&api).await;
        assert_eq!(feed.page(), 2);
        assert_eq!(feed.items().len(), 40);
        assert!(feed.error().is_none());
        assert_eq!(
            api.calls(),
            vec![Call::Latest(1), Call::Latest(2), Call::Latest(2)]
        );
    }

    #[tokio::test]
    async fn test_configured_page_size() {
        let api = FakeApi::new().with_latest(5, 1, 2);
        let config = BrowserConfig {
            page_size: 5,
            featured_count: 2,
            ..BrowserConfig::default()
        };
        let mut home = FeedController::new(FeedKind::Home, &config);

        home.mount(&api).await;
        assert!(home.has_more());
        assert_eq!(home.featured().len(), 2);

        home.load_more(&api).await;
        assert!(!home.has_more());
        assert_eq!(home.items().len(), 7);
    }
}
