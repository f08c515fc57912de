//! Catalog API client implementation.
//!
//! This module provides the HTTP client, endpoint URL construction, detail
//! identifier normalization and the wire types of the remote API.

pub mod client;
pub mod endpoints;
pub mod normalize;
pub mod types;

pub use client::AnimeClient;
pub use endpoints::DEFAULT_RESOLUTION;
pub use normalize::normalize_detail_id;
