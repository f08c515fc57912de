//! Wire types of the catalog API.
//!
//! These mirror the JSON returned by the remote API (Indonesian field names
//! included). Payloads are decoded strictly into these types, checked, and then
//! converted into the shared catalog models.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use shared::{AnimeDetail, AnimeSummary, Chapter, Movie, Pagination, SearchPage, Stream, VideoData};
use tracing::warn;

/// `{ "data": [...] }` wrapper used by detail and video responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

/// Catalog entry as returned by latest and search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAnime {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub url: String,
    pub judul: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub lastch: Option<String>,
    #[serde(default)]
    pub lastup: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub sinopsis: Option<String>,
    #[serde(default)]
    pub studio: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rilis: Option<String>,
    #[serde(default)]
    pub total_episode: Option<u32>,
}

/// Title detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAnimeDetail {
    pub id: u64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub series_id: String,
    #[serde(default)]
    pub bookmark: Option<String>,
    #[serde(default)]
    pub cover: String,
    pub judul: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub countdown: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub genreurl: Vec<String>,
    #[serde(default)]
    pub sinopsis: String,
    #[serde(default)]
    pub history: Vec<String>,
    #[serde(rename = "historyDurasi", default)]
    pub history_durasi: Vec<f64>,
    #[serde(rename = "historyDurasiFull", default)]
    pub history_durasi_full: Vec<f64>,
    pub chapter: Vec<ApiChapter>,
}

/// Episode entry inside a title detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiChapter {
    pub id: u64,
    #[serde(deserialize_with = "string_or_number")]
    pub ch: String,
    pub url: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub history: String,
    #[serde(rename = "lastDurasi", default)]
    pub last_durasi: Option<f64>,
    #[serde(rename = "fullDurasi", default)]
    pub full_durasi: Option<f64>,
}

/// Movie catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMovie {
    pub id: u64,
    pub url: String,
    pub judul: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub lastch: String,
    #[serde(default)]
    pub lastup: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiVideoStream {
    pub reso: String,
    pub link: String,
    #[serde(default)]
    pub provide: i64,
    #[serde(default)]
    pub id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiVideoData {
    pub episode_id: u64,
    #[serde(rename = "likeCount", default)]
    pub like_count: i64,
    #[serde(rename = "dislikeCount", default)]
    pub dislike_count: i64,
    #[serde(rename = "userLikeStatus", default)]
    pub user_like_status: i64,
    pub reso: Vec<String>,
    pub stream: Vec<ApiVideoStream>,
}

/// Search response: `{ "data": [{ jumlah, result, pagination }] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSearchResponse {
    pub data: Vec<ApiSearchBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSearchBlock {
    #[serde(default)]
    pub jumlah: u32,
    pub result: Vec<ApiAnime>,
    pub pagination: ApiPagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPagination {
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub next_page: Option<serde_json::Value>,
    #[serde(default)]
    pub next_offset: Option<serde_json::Value>,
}

/// Accept either a JSON string or a JSON number for identifier-like fields
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

/// Decode a response body into a wire type
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Schema(e.to_string()))
}

fn require_non_empty(value: &str, what: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::Schema(format!("{what} is empty")))
    } else {
        Ok(())
    }
}

/// Checks applied after decoding, beyond what the types enforce
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

impl Validate for ApiAnime {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.url, "anime url")
    }
}

impl Validate for ApiChapter {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.url, "chapter url")
    }
}

impl Validate for ApiAnimeDetail {
    fn validate(&self) -> Result<(), ApiError> {
        self.chapter.iter().try_for_each(Validate::validate)
    }
}

impl Validate for ApiMovie {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.url, "movie url")
    }
}

impl Validate for ApiVideoData {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

impl Validate for ApiPagination {
    fn validate(&self) -> Result<(), ApiError> {
        if self.page == 0 {
            return Err(ApiError::Schema("pagination page is 0".to_string()));
        }
        Ok(())
    }
}

impl Validate for ApiSearchBlock {
    fn validate(&self) -> Result<(), ApiError> {
        self.pagination.validate()?;
        self.result.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ApiError> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for DataResponse<T> {
    fn validate(&self) -> Result<(), ApiError> {
        self.data.validate()
    }
}

impl Validate for ApiSearchResponse {
    fn validate(&self) -> Result<(), ApiError> {
        self.data.validate()
    }
}

impl From<ApiAnime> for AnimeSummary {
    fn from(anime: ApiAnime) -> Self {
        Self {
            id: anime.id,
            url: anime.url,
            title: anime.judul,
            cover_url: anime.cover,
            last_chapter_label: anime.lastch,
            last_update_label: anime.lastup,
            genres: anime.genre,
            synopsis: anime.sinopsis,
            studio: anime.studio,
            score: anime.score,
            status: anime.status,
            release_info: anime.rilis,
            total_episodes: anime.total_episode,
        }
    }
}

impl From<ApiChapter> for Chapter {
    fn from(chapter: ApiChapter) -> Self {
        Self {
            id: chapter.id,
            label: chapter.ch,
            url: chapter.url,
            date: chapter.date,
            history_label: chapter.history,
            last_duration: chapter.last_durasi,
            full_duration: chapter.full_durasi,
        }
    }
}

impl From<ApiAnimeDetail> for AnimeDetail {
    fn from(detail: ApiAnimeDetail) -> Self {
        Self {
            id: detail.id,
            series_id: detail.series_id,
            bookmark: detail.bookmark,
            cover_url: detail.cover,
            title: detail.judul,
            kind: detail.kind,
            countdown: detail.countdown,
            status: detail.status,
            rating: detail.rating,
            published: detail.published,
            author: detail.author,
            genres: detail.genre,
            genre_urls: detail.genreurl,
            synopsis: detail.sinopsis,
            history_labels: detail.history,
            history_durations: detail.history_durasi,
            history_durations_full: detail.history_durasi_full,
            chapters: detail.chapter.into_iter().map(Chapter::from).collect(),
        }
    }
}

impl From<ApiMovie> for Movie {
    fn from(movie: ApiMovie) -> Self {
        Self {
            id: movie.id,
            url: movie.url,
            title: movie.judul,
            cover_url: movie.cover,
            last_chapter_label: movie.lastch,
            last_update_label: movie.lastup,
        }
    }
}

impl From<ApiVideoData> for VideoData {
    fn from(video: ApiVideoData) -> Self {
        let episode_id = video.episode_id;
        let streams = video
            .stream
            .into_iter()
            .filter_map(|s| {
                if s.link.trim().is_empty() {
                    warn!(episode_id, stream_id = s.id, "Dropping stream without link");
                    return None;
                }
                Some(Stream {
                    resolution: s.reso,
                    link: s.link,
                    provider_id: s.provide,
                    id: s.id,
                })
            })
            .collect();

        Self {
            episode_id,
            like_count: video.like_count,
            dislike_count: video.dislike_count,
            user_like_status: video.user_like_status,
            available_resolutions: video.reso,
            streams,
        }
    }
}

impl From<ApiPagination> for Pagination {
    fn from(p: ApiPagination) -> Self {
        Self {
            page: p.page,
            per_page: p.per_page,
            total: p.total,
            total_pages: p.total_pages.max(1),
            has_next: p.has_next,
        }
    }
}

impl ApiSearchResponse {
    /// Convert into a search page; `data: []` becomes an empty page
    pub fn into_page(self, requested_page: u32) -> SearchPage {
        match self.data.into_iter().next() {
            Some(block) => SearchPage {
                results: block.result.into_iter().map(AnimeSummary::from).collect(),
                pagination: block.pagination.into(),
            },
            None => SearchPage::empty(requested_page),
        }
    }
}
