//! Title detail page: metadata, episode list and the player.
//!
//! Two request slots are tracked separately. The detail fetch supersedes any
//! video still in flight; a video fetch only supersedes older videos.

use crate::error::ViewError;
use crate::request::{RequestTracker, Ticket};
use anime_api::{normalize_detail_id, AnimeApi, ApiError};
use shared::{AnimeDetail, Chapter, VideoData};
use tracing::{debug, info, warn};

/// An issued detail fetch
#[derive(Debug, Clone)]
pub struct DetailRequest {
    ticket: Ticket,
    /// Normalized identifier sent to the catalog
    pub url_id: String,
}

/// An issued video fetch
#[derive(Debug, Clone)]
pub struct VideoRequest {
    ticket: Ticket,
    pub chapter_url: String,
    pub resolution: String,
}

#[derive(Debug)]
pub struct DetailController {
    detail: Option<AnimeDetail>,
    loading: bool,
    error: Option<ViewError>,
    selected_chapter: Option<Chapter>,
    video: Option<VideoData>,
    video_loading: bool,
    /// Last video fetch succeeded but had nothing playable
    video_missing: bool,
    selected_resolution: String,
    tracker: RequestTracker,
    video_tracker: RequestTracker,
}

impl DetailController {
    pub fn new(default_resolution: &str) -> Self {
        Self {
            detail: None,
            loading: false,
            error: None,
            selected_chapter: None,
            video: None,
            video_loading: false,
            video_missing: false,
            selected_resolution: default_resolution.to_string(),
            tracker: RequestTracker::new(),
            video_tracker: RequestTracker::new(),
        }
    }

    pub fn detail(&self) -> Option<&AnimeDetail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn selected_chapter(&self) -> Option<&Chapter> {
        self.selected_chapter.as_ref()
    }

    pub fn video(&self) -> Option<&VideoData> {
        self.video.as_ref()
    }

    pub fn is_video_loading(&self) -> bool {
        self.video_loading
    }

    /// The catalog answered for the selected chapter with no playable stream
    pub fn is_video_unavailable(&self) -> bool {
        !self.video_loading && self.video_missing
    }

    pub fn selected_resolution(&self) -> &str {
        &self.selected_resolution
    }

    pub fn chapters(&self) -> &[Chapter] {
        self.detail.as_ref().map(|d| d.chapters.as_slice()).unwrap_or(&[])
    }

    /// Start loading the title behind a route id.
    ///
    /// Returns `None` and records `InvalidId` when nothing is left after
    /// dropping a `?` suffix and trimming.
    pub fn begin_mount(&mut self, route_id: &str) -> Option<DetailRequest> {
        self.detail = None;
        self.selected_chapter = None;
        self.video = None;
        self.video_loading = false;
        self.video_missing = false;
        self.error = None;
        self.video_tracker.invalidate();

        let url_id = normalize_detail_id(route_id);
        if url_id.is_empty() {
            warn!(route_id, "Rejecting empty anime id");
            self.tracker.invalidate();
            self.loading = false;
            self.error = Some(ViewError::InvalidId);
            return None;
        }

        self.loading = true;
        Some(DetailRequest {
            ticket: self.tracker.issue(),
            url_id,
        })
    }

    /// Apply the detail fetch. On success with chapters, the first chapter is
    /// selected and its video fetch returned.
    pub fn finish_mount(
        &mut self,
        request: DetailRequest,
        result: Result<Vec<AnimeDetail>, ApiError>,
    ) -> Option<VideoRequest> {
        if !self.tracker.is_current(request.ticket) {
            debug!(
                url_id = %request.url_id,
                generation = request.ticket.generation(),
                "Dropping stale detail"
            );
            return None;
        }
        self.loading = false;

        let detail = match result {
            Ok(found) => match found.into_iter().next() {
                Some(detail) => detail,
                None => {
                    info!(url_id = %request.url_id, "Anime not found");
                    self.error = Some(ViewError::NotFound);
                    return None;
                }
            },
            Err(e) => {
                warn!(url_id = %request.url_id, error = %e, "Failed to load anime detail");
                self.error = Some(e.into());
                return None;
            }
        };

        info!(
            url_id = %request.url_id,
            title = %detail.title,
            chapters = detail.chapters.len(),
            "Anime detail loaded"
        );

        let first = detail.chapters.first().cloned();
        self.detail = Some(detail);
        match first {
            Some(chapter) => Some(self.begin_select_episode(chapter)),
            None => {
                self.error = Some(ViewError::NoEpisodes);
                None
            }
        }
    }

    /// Switch to `chapter`; the previous video is discarded
    pub fn begin_select_episode(&mut self, chapter: Chapter) -> VideoRequest {
        self.video = None;
        self.selected_chapter = Some(chapter);
        self.issue_video()
    }

    /// Select by position in the episode list; `None` if out of range
    pub fn begin_select_episode_at(&mut self, index: usize) -> Option<VideoRequest> {
        let chapter = self.chapters().get(index).cloned()?;
        Some(self.begin_select_episode(chapter))
    }

    /// Switch resolution. Re-fetches for the selected chapter if there is one;
    /// the current video stays visible until the new one arrives.
    pub fn begin_select_resolution(&mut self, resolution: &str) -> Option<VideoRequest> {
        self.selected_resolution = resolution.to_string();
        if self.selected_chapter.is_none() {
            return None;
        }
        Some(self.issue_video())
    }

    fn issue_video(&mut self) -> VideoRequest {
        let chapter_url = self
            .selected_chapter
            .as_ref()
            .map(|c| c.url.clone())
            .unwrap_or_default();
        self.video_loading = true;
        self.video_missing = false;
        VideoRequest {
            ticket: self.video_tracker.issue(),
            chapter_url,
            resolution: self.selected_resolution.clone(),
        }
    }

    /// Apply a video fetch. Failures leave `error` untouched.
    pub fn finish_video(&mut self, request: VideoRequest, result: Result<Vec<VideoData>, ApiError>) -> bool {
        if !self.video_tracker.is_current(request.ticket) {
            debug!(
                chapter = %request.chapter_url,
                resolution = %request.resolution,
                generation = request.ticket.generation(),
                "Dropping stale video"
            );
            return false;
        }
        self.video_loading = false;

        match result {
            Ok(found) => {
                let video = found.into_iter().next();
                self.video_missing = video.as_ref().and_then(VideoData::primary_stream).is_none();
                if self.video_missing {
                    warn!(chapter = %request.chapter_url, "No playable video returned");
                }
                self.video = video;
            }
            Err(e) => {
                warn!(
                    chapter = %request.chapter_url,
                    resolution = %request.resolution,
                    error = %e,
                    "Failed to load video"
                );
            }
        }
        true
    }

    pub async fn mount<A: AnimeApi>(&mut self, api: &A, route_id: &str) {
        let Some(request) = self.begin_mount(route_id) else {
            return;
        };
        let result = api.fetch_detail(&request.url_id).await;
        if let Some(video) = self.finish_mount(request, result) {
            self.load_video(api, video).await;
        }
    }

    pub async fn select_episode<A: AnimeApi>(&mut self, api: &A, chapter: Chapter) {
        let request = self.begin_select_episode(chapter);
        self.load_video(api, request).await;
    }

    pub async fn select_episode_at<A: AnimeApi>(&mut self, api: &A, index: usize) {
        if let Some(request) = self.begin_select_episode_at(index) {
            self.load_video(api, request).await;
        }
    }

    pub async fn select_resolution<A: AnimeApi>(&mut self, api: &A, resolution: &str) {
        if let Some(request) = self.begin_select_resolution(resolution) {
            self.load_video(api, request).await;
        }
    }

    async fn load_video<A: AnimeApi>(&mut self, api: &A, request: VideoRequest) {
        let result = api.fetch_video(&request.chapter_url, &request.resolution).await;
        self.finish_video(request, result);
    }
}
