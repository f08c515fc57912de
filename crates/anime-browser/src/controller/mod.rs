//! Page controllers.

pub mod detail;
pub mod feed;
pub mod movies;
pub mod search;

pub use detail::{DetailController, DetailRequest, VideoRequest};
pub use feed::{FeedController, FeedKind, PageRequest};
pub use movies::MovieController;
pub use search::{SearchController, SearchRequest};
