//! Data models for the catalog.
//!
//! These are the records every page works with. They are built from the remote
//! API's wire types at the client boundary and are never written back.

use serde::{Deserialize, Serialize};

/// Lightweight catalog entry used by list and grid views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeSummary {
    pub id: String,
    /// Title URL identifier, used to open the detail page
    pub url: String,
    pub title: String,
    pub cover_url: String,
    pub last_chapter_label: Option<String>,
    pub last_update_label: Option<String>,
    pub genres: Vec<String>,
    pub synopsis: Option<String>,
    pub studio: Option<String>,
    /// Score as reported by the API (usually a decimal string)
    pub score: Option<String>,
    pub status: Option<String>,
    pub release_info: Option<String>,
    pub total_episodes: Option<u32>,
}

impl AnimeSummary {
    /// Score rounded to one decimal place, or the raw text when it isn't numeric
    pub fn display_score(&self) -> Option<String> {
        let raw = self.score.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<f64>() {
            Ok(value) => format!("{:.1}", value),
            Err(_) => raw.to_string(),
        })
    }
}

/// Full record for a single title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetail {
    pub id: u64,
    pub series_id: String,
    pub bookmark: Option<String>,
    pub cover_url: String,
    pub title: String,
    /// TV, Movie, ONA, ...
    pub kind: String,
    pub countdown: Option<String>,
    pub status: String,
    pub rating: String,
    pub published: String,
    pub author: String,
    pub genres: Vec<String>,
    pub genre_urls: Vec<String>,
    pub synopsis: String,
    pub history_labels: Vec<String>,
    pub history_durations: Vec<f64>,
    pub history_durations_full: Vec<f64>,
    pub chapters: Vec<Chapter>,
}

/// One episode of a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u64,
    /// Episode number as shown to the user
    pub label: String,
    /// Chapter URL identifier, used to request its video
    pub url: String,
    pub date: String,
    pub history_label: String,
    pub last_duration: Option<f64>,
    pub full_duration: Option<f64>,
}

/// Playable streams and engagement counters for one chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoData {
    pub episode_id: u64,
    pub like_count: i64,
    pub dislike_count: i64,
    pub user_like_status: i64,
    pub available_resolutions: Vec<String>,
    pub streams: Vec<Stream>,
}

impl VideoData {
    /// The stream that gets played: always the first one listed
    pub fn primary_stream(&self) -> Option<&Stream> {
        self.streams.first()
    }
}

/// A single playable stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub resolution: String,
    pub link: String,
    pub provider_id: i64,
    pub id: u64,
}

/// Movie catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub cover_url: String,
    pub last_chapter_label: String,
    pub last_update_label: String,
}

impl Movie {
    /// Project the movie into the shape used by catalog cards.
    ///
    /// Movies carry no genre, score or status, so those are filled with
    /// fixed values.
    pub fn to_summary(&self) -> AnimeSummary {
        AnimeSummary {
            id: self.id.to_string(),
            url: self.url.clone(),
            title: self.title.clone(),
            cover_url: self.cover_url.clone(),
            last_chapter_label: non_empty(&self.last_chapter_label),
            last_update_label: non_empty(&self.last_update_label),
            genres: Vec::new(),
            synopsis: None,
            studio: None,
            score: None,
            status: Some("Movie".to_string()),
            release_info: None,
            total_episodes: Some(1),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<AnimeSummary>,
    pub pagination: Pagination,
}

impl SearchPage {
    /// Page returned when the API reports no matches at all
    pub fn empty(page: u32) -> Self {
        Self {
            results: Vec::new(),
            pagination: Pagination {
                page,
                per_page: 0,
                total: 0,
                total_pages: 1,
                has_next: false,
            },
        }
    }
}

/// Pagination block of a search page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Movie {
        Movie {
            id: 42,
            url: "suzume".to_string(),
            title: "Suzume".to_string(),
            cover_url: "https://img.example/suzume.jpg".to_string(),
            last_chapter_label: "Movie".to_string(),
            last_update_label: "2 hari".to_string(),
        }
    }

    #[test]
    fn test_movie_projection_defaults() {
        let movie = movie();
        let summary = movie.to_summary();

        assert_eq!(summary.id, "42");
        assert_eq!(summary.url, "suzume");
        assert!(summary.genres.is_empty());
        assert_eq!(summary.status.as_deref(), Some("Movie"));
        assert_eq!(summary.total_episodes, Some(1));
        assert_eq!(summary.score, None);
        assert_eq!(summary.last_update_label.as_deref(), Some("2 hari"));
    }

    #[test]
    fn test_movie_projection_leaves_movie_untouched() {
        let movie = movie();
        let before = movie.clone();
        let _ = movie.to_summary();
        assert_eq!(movie, before);
    }

    #[test]
    fn test_display_score() {
        let mut summary = movie().to_summary();
        assert_eq!(summary.display_score(), None);

        summary.score = Some("8.26".to_string());
        assert_eq!(summary.display_score().as_deref(), Some("8.3"));

        summary.score = Some("N/A".to_string());
        assert_eq!(summary.display_score().as_deref(), Some("N/A"));

        summary.score = Some(String::new());
        assert_eq!(summary.display_score(), None);
    }

    #[test]
    fn test_empty_search_page() {
        let page = SearchPage::empty(3);
        assert!(page.results.is_empty());
        assert_eq!(page.pagination.page, 3);
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_primary_stream_is_first() {
        let video = VideoData {
            episode_id: 1,
            like_count: 0,
            dislike_count: 0,
            user_like_status: 0,
            available_resolutions: vec!["480p".to_string(), "720p".to_string()],
            streams: vec![
                Stream {
                    resolution: "720p".to_string(),
                    link: "https://cdn.example/a.mp4".to_string(),
                    provider_id: 1,
                    id: 10,
                },
                Stream {
                    resolution: "720p".to_string(),
                    link: "https://cdn.example/b.mp4".to_string(),
                    provider_id: 2,
                    id: 11,
                },
            ],
        };
        assert_eq!(video.primary_stream().map(|s| s.id), Some(10));
    }
}
