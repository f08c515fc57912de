//! Navigable routes and the route store.
//!
//! The route is the source of truth for the search page: query text and page
//! number live here, not in the controller, so a search can be bookmarked or
//! shared as a plain path.

use std::fmt;
use tokio::sync::watch;
use url::Url;

/// A navigable location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/latest`
    Latest,
    /// `/movies`
    Movies,
    /// `/search?q=<query>&page=<page>`
    Search { query: String, page: u32 },
    /// `/anime/<id>`, `id` already percent-decoded
    Detail { id: String },
}

impl Route {
    /// Parse a path (with optional query string). Unknown paths go home.
    pub fn parse(input: &str) -> Route {
        let base = match Url::parse("http://localhost/") {
            Ok(base) => base,
            Err(_) => return Route::Home,
        };
        let url = match base.join(input.trim()) {
            Ok(url) => url,
            Err(_) => return Route::Home,
        };

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Route::Home,
            ["latest"] => Route::Latest,
            ["movies"] => Route::Movies,
            ["search"] => {
                let mut query = String::new();
                let mut page = 1;
                for (key, value) in url.query_pairs() {
                    match key.as_ref() {
                        "q" => query = value.into_owned(),
                        "page" => page = value.parse::<u32>().unwrap_or(1).max(1),
                        _ => {}
                    }
                }
                Route::Search { query, page }
            }
            ["anime", id] => match urlencoding::decode(id) {
                Ok(decoded) => Route::Detail {
                    id: decoded.into_owned(),
                },
                Err(_) => Route::Home,
            },
            _ => Route::Home,
        }
    }

    /// Route of the detail page for a title URL identifier
    pub fn detail(url_id: &str) -> Route {
        Route::Detail {
            id: url_id.to_string(),
        }
    }

    pub fn search(query: &str, page: u32) -> Route {
        Route::Search {
            query: query.to_string(),
            page: page.max(1),
        }
    }

    /// The path form of this route; parsing it gives the same route back
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Latest => "/latest".to_string(),
            Route::Movies => "/movies".to_string(),
            Route::Search { query, page } => {
                format!("/search?q={}&page={}", urlencoding::encode(query), page)
            }
            Route::Detail { id } => format!("/anime/{}", urlencoding::encode(id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl From<&str> for Route {
    fn from(input: &str) -> Self {
        Route::parse(input)
    }
}

/// Holds the current route and notifies subscribers when it changes
#[derive(Debug)]
pub struct RouteStore {
    sender: watch::Sender<Route>,
}

impl RouteStore {
    pub fn new(initial: Route) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Move to `route`. Returns false when it equals the current route.
    pub fn navigate(&self, route: Route) -> bool {
        let changed = self.sender.send_if_modified(|current| {
            if *current == route {
                false
            } else {
                *current = route;
                true
            }
        });
        if changed {
            tracing::debug!(route = %self.current(), "Navigated");
        }
        changed
    }

    pub fn current(&self) -> Route {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/latest"), Route::Latest);
        assert_eq!(Route::parse("/movies/"), Route::Movies);
        assert_eq!(
            Route::parse("/search?q=naruto&page=2"),
            Route::Search {
                query: "naruto".to_string(),
                page: 2
            }
        );
    }

    #[test]
    fn test_unmatched_routes_go_home() {
        assert_eq!(Route::parse("/nope"), Route::Home);
        assert_eq!(Route::parse("/anime"), Route::Home);
        assert_eq!(Route::parse("/anime/a/b"), Route::Home);
    }

    #[test]
    fn test_search_defaults() {
        assert_eq!(Route::parse("/search"), Route::search("", 1));
        assert_eq!(Route::parse("/search?q=x&page=0"), Route::search("x", 1));
        assert_eq!(Route::parse("/search?q=x&page=abc"), Route::search("x", 1));
        assert_eq!(Route::parse("/search?q=one+piece"), Route::search("one piece", 1));
    }

    #[test]
    fn test_detail_id_is_decoded() {
        assert_eq!(
            Route::parse("/anime/One%20Piece%3A%20Season%202"),
            Route::detail("One Piece: Season 2")
        );
    }

    #[test]
    fn test_path_round_trip() {
        let routes = [
            Route::Home,
            Route::Latest,
            Route::Movies,
            Route::search("sword art & online", 3),
            Route::detail("One Piece: Season 2"),
            Route::detail("re-zero/kara?x=1"),
            Route::detail("Shingeki no Kyojin #1"),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route, "path: {}", route.path());
        }
    }

    #[test]
    fn test_store_notifies_on_change() {
        let store = RouteStore::new(Route::Home);
        let mut receiver = store.subscribe();

        assert!(!store.navigate(Route::Home));
        assert!(!receiver.has_changed().unwrap());

        assert!(store.navigate(Route::search("naruto", 1)));
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), Route::search("naruto", 1));
        assert_eq!(store.current(), Route::search("naruto", 1));
    }
}
