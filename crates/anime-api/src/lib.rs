//! Client library for the sansekai anime catalog API.
//!
//! This library turns the handful of catalog queries (latest releases, search,
//! title detail, movies, episode video) into HTTP requests, validates the
//! returned payloads and converts them into the shared catalog models.

pub mod api;
pub mod error;
pub mod observer;
pub mod traits;

pub use api::{normalize_detail_id, AnimeClient, DEFAULT_RESOLUTION};
pub use error::ApiError;
pub use observer::{RequestObserver, TracingObserver};
pub use traits::AnimeApi;
