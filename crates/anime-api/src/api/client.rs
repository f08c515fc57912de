//! Catalog API client.

use super::endpoints;
use super::types::*;
use crate::error::ApiError;
use crate::observer::{RequestObserver, TracingObserver};
use crate::traits::AnimeApi;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::config::ApiConfig;
use shared::{AnimeDetail, AnimeSummary, Movie, SearchPage, VideoData};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Catalog API client
#[derive(Clone)]
pub struct AnimeClient {
    /// HTTP client
    client: Client,
    /// Base URL including the `/api` prefix
    base_url: String,
    /// Diagnostics sink for every request
    observer: Arc<dyn RequestObserver>,
}

impl AnimeClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            observer: Arc::new(TracingObserver),
        })
    }

    /// Create a client from the `[api]` config section
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(config.base_url.clone(), config.timeout(), &config.user_agent)
    }

    /// Replace the request observer
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request and decode the JSON body
    async fn get<T: DeserializeOwned + Validate>(&self, url: &str) -> Result<T, ApiError> {
        let parsed = Url::parse(url).map_err(|e| ApiError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        self.observer.on_request("GET", url);

        let response = match self.client.get(parsed).send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ApiError::from_transport(e);
                self.observer.on_failure(err.status(), url, &err.to_string());
                return Err(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string();
            self.observer.on_failure(Some(status.as_u16()), url, &reason);
            return Err(ApiError::Network {
                status: Some(status.as_u16()),
                reason,
            });
        }

        self.observer.on_response(status.as_u16(), url);

        let body = response.text().await.map_err(|e| {
            let err = ApiError::from_transport(e);
            self.observer.on_failure(Some(status.as_u16()), url, &err.to_string());
            err
        })?;

        let data = decode::<T>(&body).and_then(|data| data.validate().map(|_| data));
        match data {
            Ok(data) => {
                debug!(url = %url, "Response decoded");
                Ok(data)
            }
            Err(err) => {
                self.observer.on_failure(Some(status.as_u16()), url, &err.to_string());
                Err(err)
            }
        }
    }
}

impl AnimeApi for AnimeClient {
    async fn fetch_latest(&self, page: u32) -> Result<Vec<AnimeSummary>, ApiError> {
        info!(page, "Fetching latest anime");
        let url = endpoints::latest_url(&self.base_url, page.max(1));
        let items: Vec<ApiAnime> = self.get(&url).await?;
        Ok(items.into_iter().map(AnimeSummary::from).collect())
    }

    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::EmptyQuery);
        }
        let page = page.max(1);

        info!(query, page, "Searching anime");
        let url = endpoints::search_url(&self.base_url, query, page);
        let response: ApiSearchResponse = self.get(&url).await?;
        Ok(response.into_page(page))
    }

    async fn fetch_detail(&self, url_id: &str) -> Result<Vec<AnimeDetail>, ApiError> {
        let url = endpoints::detail_url(&self.base_url, url_id);
        info!(url_id, url = %url, "Fetching anime detail");
        let response: DataResponse<ApiAnimeDetail> = self.get(&url).await?;
        Ok(response.data.into_iter().map(AnimeDetail::from).collect())
    }

    async fn fetch_movies(&self) -> Result<Vec<Movie>, ApiError> {
        info!("Fetching movies");
        let url = endpoints::movies_url(&self.base_url);
        let movies: Vec<ApiMovie> = self.get(&url).await?;
        Ok(movies.into_iter().map(Movie::from).collect())
    }

    async fn fetch_video(&self, chapter_url_id: &str, resolution: &str) -> Result<Vec<VideoData>, ApiError> {
        info!(chapter_url_id, resolution, "Fetching video");
        let url = endpoints::video_url(&self.base_url, chapter_url_id, resolution);
        let response: DataResponse<ApiVideoData> = self.get(&url).await?;
        Ok(response.data.into_iter().map(VideoData::from).collect())
    }
}
