//! Route and command dispatch.
//!
//! [`App`] owns the API client, the route store and the page for the current
//! route. Navigation always goes through the store; the page is rebuilt when
//! the route changes, except that search-to-search changes re-sync the same
//! controller so the search box keeps its state.

use crate::controller::{DetailController, FeedController, FeedKind, MovieController, SearchController};
use crate::render::{help_text, render_page};
use crate::route::{Route, RouteStore};
use anime_api::AnimeApi;
use shared::config::BrowserConfig;
use shared::AnimeSummary;
use std::any::Any;
use tokio::sync::watch;
use tracing::{debug, error, info};

const UNAVAILABLE: &str = "Perintah tidak tersedia di halaman ini";

/// The page mounted for the current route
#[derive(Debug)]
pub enum Page {
    Feed(FeedController),
    Search(SearchController),
    Detail(DetailController),
    Movies(MovieController),
}

impl Page {
    fn for_route(route: &Route, settings: &BrowserConfig) -> Page {
        match route {
            Route::Home => Page::Feed(FeedController::new(FeedKind::Home, settings)),
            Route::Latest => Page::Feed(FeedController::new(FeedKind::Latest, settings)),
            Route::Movies => Page::Movies(MovieController::new()),
            Route::Search { .. } => Page::Search(SearchController::new()),
            Route::Detail { .. } => Page::Detail(DetailController::new(&settings.default_resolution)),
        }
    }

    /// Cards on list pages, numbered from 1 by the renderer
    fn cards(&self) -> Vec<AnimeSummary> {
        match self {
            Page::Feed(feed) => feed.items().to_vec(),
            Page::Search(search) => search.items().to_vec(),
            Page::Movies(movies) => movies.cards(),
            Page::Detail(_) => Vec::new(),
        }
    }
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(Route),
    Home,
    Latest,
    Movies,
    Search(String),
    Next,
    Prev,
    More,
    Refresh,
    Retry,
    /// 1-based index into the episode list
    Episode(usize),
    Resolution(String),
    /// 1-based index into the cards of a list page
    Open(usize),
    Reload,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse one input line; `None` for a blank line
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word.to_lowercase().as_str(), rest) {
            ("go", target) if !target.is_empty() => Command::Go(Route::parse(target)),
            ("home", _) => Command::Home,
            ("latest", _) => Command::Latest,
            ("movies", _) => Command::Movies,
            ("search", text) => Command::Search(text.to_string()),
            ("next", _) => Command::Next,
            ("prev", _) => Command::Prev,
            ("more", _) => Command::More,
            ("refresh", _) => Command::Refresh,
            ("retry", _) => Command::Retry,
            ("ep", n) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Episode(n),
                _ => Command::Unknown(line.to_string()),
            },
            ("reso", r) if !r.is_empty() => Command::Resolution(r.to_string()),
            ("open", n) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Open(n),
                _ => Command::Unknown(line.to_string()),
            },
            ("reload", _) => Command::Reload,
            ("help", _) | ("?", _) => Command::Help,
            ("quit", _) | ("exit", _) | ("q", _) => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// What the input loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub struct App<A: AnimeApi> {
    api: A,
    settings: BrowserConfig,
    routes: RouteStore,
    receiver: watch::Receiver<Route>,
    page: Page,
    /// One-shot message shown above the next render
    notice: Option<String>,
}

impl<A: AnimeApi> App<A> {
    /// Create the app at `initial`. Nothing is fetched until [`App::start`].
    pub fn new(api: A, settings: BrowserConfig, initial: Route) -> Self {
        let routes = RouteStore::new(initial.clone());
        let receiver = routes.subscribe();
        let page = Page::for_route(&initial, &settings);
        Self {
            api,
            settings,
            routes,
            receiver,
            page,
            notice: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn route(&self) -> Route {
        self.routes.current()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Mount the page for the initial route
    pub async fn start(&mut self) {
        let route = self.receiver.borrow_and_update().clone();
        self.mount(route).await;
    }

    /// Current page as text, preceded by any pending notice
    pub fn render(&mut self) -> String {
        let body = render_page(&self.page);
        match self.notice.take() {
            Some(notice) => format!("{notice}\n\n{body}"),
            None => body,
        }
    }

    pub async fn handle(&mut self, command: Command) -> Outcome {
        debug!(?command, route = %self.route(), "Handling command");
        match command {
            Command::Quit => return Outcome::Quit,
            Command::Help => self.notice = Some(help_text()),
            Command::Unknown(input) => {
                self.notice = Some(format!("Perintah tidak dikenal: {input}\n\n{}", help_text()));
            }
            Command::Go(route) => self.navigate(route).await,
            Command::Home => self.navigate(Route::Home).await,
            Command::Latest => self.navigate(Route::Latest).await,
            Command::Movies => self.navigate(Route::Movies).await,
            Command::Search(text) => self.search(&text).await,
            Command::Next => self.paginate(true).await,
            Command::Prev => self.paginate(false).await,
            Command::More => match &mut self.page {
                Page::Feed(feed) => feed.load_more(&self.api).await,
                _ => self.notice = Some(UNAVAILABLE.to_string()),
            },
            Command::Refresh => match &mut self.page {
                Page::Feed(feed) => feed.refresh(&self.api).await,
                Page::Movies(movies) => movies.retry(&self.api).await,
                _ => self.reload().await,
            },
            Command::Retry => self.retry().await,
            Command::Episode(n) => match &mut self.page {
                Page::Detail(detail) if n >= 1 && n <= detail.chapters().len() => {
                    detail.select_episode_at(&self.api, n - 1).await;
                }
                Page::Detail(_) => self.notice = Some(format!("Episode {n} tidak ada")),
                _ => self.notice = Some(UNAVAILABLE.to_string()),
            },
            Command::Resolution(reso) => match &mut self.page {
                Page::Detail(detail) => detail.select_resolution(&self.api, &reso).await,
                _ => self.notice = Some(UNAVAILABLE.to_string()),
            },
            Command::Open(n) => {
                let cards = self.page.cards();
                match n.checked_sub(1).and_then(|i| cards.get(i)) {
                    Some(card) => {
                        let route = Route::detail(&card.url);
                        self.navigate(route).await;
                    }
                    None => self.notice = Some(format!("Tidak ada kartu nomor {n}")),
                }
            }
            Command::Reload => self.reload().await,
        }
        Outcome::Continue
    }

    /// Navigate through the store and follow the change, if any
    pub async fn navigate(&mut self, route: Route) {
        if !self.routes.navigate(route) {
            return;
        }
        if matches!(self.receiver.has_changed(), Ok(true)) {
            let route = self.receiver.borrow_and_update().clone();
            self.follow(route).await;
        }
    }

    /// Re-mount the page for the current route from scratch
    pub async fn reload(&mut self) {
        let route = self.route();
        info!(route = %route, "Reloading page");
        self.mount(route).await;
    }

    async fn follow(&mut self, route: Route) {
        if let (Page::Search(search), Route::Search { .. }) = (&mut self.page, &route) {
            search.sync_route(&self.api, &route).await;
            return;
        }
        self.mount(route).await;
    }

    async fn mount(&mut self, route: Route) {
        info!(route = %route, "Mounting page");
        self.page = Page::for_route(&route, &self.settings);
        match (&mut self.page, &route) {
            (Page::Feed(feed), _) => feed.mount(&self.api).await,
            (Page::Movies(movies), _) => movies.mount(&self.api).await,
            (Page::Search(search), Route::Search { .. }) => search.sync_route(&self.api, &route).await,
            (Page::Detail(detail), Route::Detail { id }) => detail.mount(&self.api, id).await,
            _ => {}
        }
    }

    async fn search(&mut self, text: &str) {
        let route = match &mut self.page {
            Page::Search(search) => {
                search.set_input(text);
                search.submit()
            }
            _ => {
                let text = text.trim();
                (!text.is_empty()).then(|| Route::search(text, 1))
            }
        };
        match route {
            Some(route) => self.navigate(route).await,
            None => self.navigate(Route::search("", 1)).await,
        }
    }

    async fn paginate(&mut self, forward: bool) {
        let route = match &self.page {
            Page::Search(search) if forward => search.next_page(),
            Page::Search(search) => search.previous_page(),
            _ => None,
        };
        match route {
            Some(route) => self.navigate(route).await,
            None => self.notice = Some(UNAVAILABLE.to_string()),
        }
    }

    async fn retry(&mut self) {
        match &mut self.page {
            Page::Feed(feed) => feed.retry(&self.api).await,
            Page::Movies(movies) => movies.retry(&self.api).await,
            Page::Search(search) => {
                let (query, page) = (search.query().to_string(), search.page());
                search.sync(&self.api, &query, page).await;
            }
            Page::Detail(_) => self.reload().await,
        }
    }
}

/// Result of one guarded step: the app survives unless the step panicked
pub enum Step<A: AnimeApi> {
    Done(Box<App<A>>, Outcome, String),
    Crashed(String),
}

/// Run one command (or the initial mount when `command` is `None`) on its own
/// task so a panic only costs the current page.
///
/// On success the app comes back together with the rendered screen. After a
/// crash the app is gone; the caller rebuilds it for the last known route.
pub async fn run_guarded<A: AnimeApi + 'static>(mut app: Box<App<A>>, command: Option<Command>) -> Step<A> {
    let task = tokio::spawn(async move {
        let outcome = match command {
            Some(command) => app.handle(command).await,
            None => {
                app.start().await;
                Outcome::Continue
            }
        };
        let screen = app.render();
        (app, outcome, screen)
    });

    match task.await {
        Ok((app, outcome, screen)) => Step::Done(app, outcome, screen),
        Err(e) if e.is_panic() => {
            let reason = panic_reason(e.into_panic());
            error!(reason = %reason, "Page crashed");
            Step::Crashed(reason)
        }
        Err(e) => {
            error!(error = %e, "Page task failed");
            Step::Crashed(e.to_string())
        }
    }
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
