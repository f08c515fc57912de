//! The catalog API seam.
//!
//! Page controllers are written against [`AnimeApi`] so they can run against
//! the HTTP client or an in-memory stand-in.

use std::future::Future;

use crate::error::ApiError;
use shared::{AnimeDetail, AnimeSummary, Movie, SearchPage, VideoData};

/// Catalog queries offered by the remote API.
pub trait AnimeApi: Send + Sync {
    /// Latest releases, one page at a time (`page` starts at 1).
    fn fetch_latest(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<Vec<AnimeSummary>, ApiError>> + Send;

    /// Search titles. An empty query is rejected without a request.
    fn search(
        &self,
        query: &str,
        page: u32,
    ) -> impl Future<Output = Result<SearchPage, ApiError>> + Send;

    /// Title detail. The API wraps a single logical result in a list; an empty
    /// list means the title was not found.
    fn fetch_detail(
        &self,
        url_id: &str,
    ) -> impl Future<Output = Result<Vec<AnimeDetail>, ApiError>> + Send;

    /// The full movie catalog.
    fn fetch_movies(&self) -> impl Future<Output = Result<Vec<Movie>, ApiError>> + Send;

    /// Streams for one chapter at the given resolution.
    fn fetch_video(
        &self,
        chapter_url_id: &str,
        resolution: &str,
    ) -> impl Future<Output = Result<Vec<VideoData>, ApiError>> + Send;
}
