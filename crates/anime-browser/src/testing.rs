//! In-memory catalog used by controller and app tests.

use anime_api::{normalize_detail_id, AnimeApi, ApiError};
use shared::{
    AnimeDetail, AnimeSummary, Chapter, Movie, Pagination, SearchPage, Stream, VideoData,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// A call the fake received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Latest(u32),
    Search(String, u32),
    Detail(String),
    Movies,
    Video(String, String),
}

/// Scripted catalog that records every call
#[derive(Default)]
pub struct FakeApi {
    pub latest: Mutex<HashMap<u32, Vec<AnimeSummary>>>,
    pub search: Mutex<HashMap<(String, u32), SearchPage>>,
    pub details: Mutex<HashMap<String, AnimeDetail>>,
    pub movies: Mutex<Vec<Movie>>,
    /// Status returned by every call while set
    pub fail_with: Mutex<Option<u16>>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest feed with `pages` full pages of `page_size` followed by a short one
    pub fn with_latest(self, page_size: usize, full_pages: u32, last_page_len: usize) -> Self {
        {
            let mut latest = self.latest.lock().unwrap();
            for page in 1..=full_pages {
                latest.insert(page, summaries(page, page_size));
            }
            latest.insert(full_pages + 1, summaries(full_pages + 1, last_page_len));
        }
        self
    }

    pub fn with_search(self, query: &str, page: u32, total: u32, total_pages: u32, count: usize) -> Self {
        self.search.lock().unwrap().insert(
            (query.to_string(), page),
            SearchPage {
                results: summaries(page, count),
                pagination: Pagination {
                    page,
                    per_page: 20,
                    total,
                    total_pages,
                    has_next: page < total_pages,
                },
            },
        );
        self
    }

    /// Register a title under its canonical identifier
    pub fn with_detail(self, url_id: &str, detail: AnimeDetail) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(normalize_detail_id(url_id), detail);
        self
    }

    pub fn with_movies(self, movies: Vec<Movie>) -> Self {
        *self.movies.lock().unwrap() = movies;
        self
    }

    pub fn fail(&self, status: Option<u16>) {
        *self.fail_with.lock().unwrap() = status;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn video_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Video(..)))
            .collect()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match *self.fail_with.lock().unwrap() {
            Some(status) => Err(ApiError::Network {
                status: Some(status),
                reason: "scripted failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl AnimeApi for FakeApi {
    async fn fetch_latest(&self, page: u32) -> Result<Vec<AnimeSummary>, ApiError> {
        self.record(Call::Latest(page))?;
        Ok(self
            .latest
            .lock()
            .unwrap()
            .get(&page)
            .cloned()
            .unwrap_or_default())
    }

    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ApiError> {
        self.record(Call::Search(query.to_string(), page))?;
        Ok(self
            .search
            .lock()
            .unwrap()
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or_else(|| SearchPage::empty(page)))
    }

    async fn fetch_detail(&self, url_id: &str) -> Result<Vec<AnimeDetail>, ApiError> {
        self.record(Call::Detail(url_id.to_string()))?;
        Ok(self
            .details
            .lock()
            .unwrap()
            .get(&normalize_detail_id(url_id))
            .cloned()
            .into_iter()
            .collect())
    }

    async fn fetch_movies(&self) -> Result<Vec<Movie>, ApiError> {
        self.record(Call::Movies)?;
        Ok(self.movies.lock().unwrap().clone())
    }

    async fn fetch_video(&self, chapter_url_id: &str, resolution: &str) -> Result<Vec<VideoData>, ApiError> {
        self.record(Call::Video(chapter_url_id.to_string(), resolution.to_string()))?;
        Ok(vec![video(chapter_url_id, resolution)])
    }
}

pub fn summary(id: &str) -> AnimeSummary {
    AnimeSummary {
        id: id.to_string(),
        url: format!("anime-{id}"),
        title: format!("Anime {id}"),
        cover_url: format!("https://img.example/{id}.jpg"),
        last_chapter_label: Some("Episode 1".to_string()),
        last_update_label: Some("1 jam".to_string()),
        genres: vec!["Action".to_string()],
        synopsis: None,
        studio: None,
        score: Some("7.5".to_string()),
        status: Some("Ongoing".to_string()),
        release_info: None,
        total_episodes: Some(12),
    }
}

/// `count` entries whose ids encode the page they came from
pub fn summaries(page: u32, count: usize) -> Vec<AnimeSummary> {
    (0..count).map(|i| summary(&format!("{page}-{i}"))).collect()
}

pub fn chapter(n: u64) -> Chapter {
    Chapter {
        id: n,
        label: n.to_string(),
        url: format!("episode-{n}"),
        date: format!("{n} Jan"),
        history_label: String::new(),
        last_duration: None,
        full_duration: None,
    }
}

pub fn detail(title: &str, chapters: u64) -> AnimeDetail {
    AnimeDetail {
        id: 1,
        series_id: "series".to_string(),
        bookmark: None,
        cover_url: "https://img.example/detail.jpg".to_string(),
        title: title.to_string(),
        kind: "TV".to_string(),
        countdown: None,
        status: "Ongoing".to_string(),
        rating: "8.7".to_string(),
        published: "2023".to_string(),
        author: "Studio".to_string(),
        genres: vec!["Adventure".to_string()],
        genre_urls: vec!["adventure".to_string()],
        synopsis: "A long journey.".to_string(),
        history_labels: Vec::new(),
        history_durations: Vec::new(),
        history_durations_full: Vec::new(),
        chapters: (1..=chapters).map(chapter).collect(),
    }
}

pub fn video(chapter_url: &str, resolution: &str) -> VideoData {
    VideoData {
        episode_id: 1,
        like_count: 10,
        dislike_count: 1,
        user_like_status: 0,
        available_resolutions: vec!["480p".to_string(), "720p".to_string(), "1080p".to_string()],
        streams: vec![Stream {
            resolution: resolution.to_string(),
            link: format!("https://cdn.example/{chapter_url}/{resolution}.mp4"),
            provider_id: 1,
            id: 1,
        }],
    }
}

pub fn movie(id: u64) -> Movie {
    Movie {
        id,
        url: format!("movie-{id}"),
        title: format!("Movie {id}"),
        cover_url: format!("https://img.example/m{id}.jpg"),
        last_chapter_label: "Movie".to_string(),
        last_update_label: "2 hari".to_string(),
    }
}
