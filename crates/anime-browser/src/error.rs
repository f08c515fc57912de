//! Page-level error taxonomy.

use anime_api::ApiError;
use thiserror::Error;

/// Errors a page can end up showing.
///
/// These never escape a page: controllers store them and the renderer turns
/// them into a message with a retry affordance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// Transport failure, timeout, non-2xx status or malformed payload
    #[error("network error: {reason}")]
    Network { status: Option<u16>, reason: String },

    /// Well-formed but empty result
    #[error("anime not found")]
    NotFound,

    /// The title exists but has no chapters
    #[error("no episodes available")]
    NoEpisodes,

    /// Missing or empty route identifier
    #[error("invalid anime id")]
    InvalidId,
}

impl From<ApiError> for ViewError {
    fn from(err: ApiError) -> Self {
        ViewError::Network {
            status: err.status(),
            reason: err.to_string(),
        }
    }
}

impl ViewError {
    pub fn is_network(&self) -> bool {
        matches!(self, ViewError::Network { .. })
    }
}
