//! Terminal browser for the anime catalog.
//!
//! Pages (home, latest, search, movies, title detail) are driven by
//! controllers that own their loading/error/selection state and talk to the
//! catalog through [`anime_api::AnimeApi`]. The renderer turns controller
//! state into text; [`App`] maps routes and commands onto pages.

pub mod app;
pub mod controller;
pub mod error;
pub mod render;
pub mod request;
pub mod route;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{run_guarded, App, Command, Outcome, Page, Step};
pub use controller::{DetailController, FeedController, FeedKind, MovieController, SearchController};
pub use error::ViewError;
pub use request::{RequestTracker, Ticket};
pub use route::{Route, RouteStore};
