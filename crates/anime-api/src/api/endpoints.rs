//! Request URLs for the catalog endpoints.
//!
//! Detail and video identifiers are placed into the query string verbatim:
//! they are already in the form the server expects, and encoding them again
//! would turn `%3a` into `%253a`.

use super::normalize::normalize_detail_id;
use url::form_urlencoded;

/// Resolution requested when the caller has no preference
pub const DEFAULT_RESOLUTION: &str = "720p";

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

pub fn latest_url(base_url: &str, page: u32) -> String {
    format!("{}/anime/latest?page={}", trim_base(base_url), page)
}

pub fn search_url(base_url: &str, query: &str, page: u32) -> String {
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("query", query)
        .append_pair("page", &page.to_string())
        .finish();
    format!("{}/anime/search?{}", trim_base(base_url), params)
}

/// Detail URL for a raw title identifier (normalized here)
pub fn detail_url(base_url: &str, url_id: &str) -> String {
    format!(
        "{}/anime/detail?urlId={}",
        trim_base(base_url),
        normalize_detail_id(url_id)
    )
}

pub fn movies_url(base_url: &str) -> String {
    format!("{}/anime/movie", trim_base(base_url))
}

pub fn video_url(base_url: &str, chapter_url_id: &str, resolution: &str) -> String {
    let resolution = if resolution.trim().is_empty() {
        DEFAULT_RESOLUTION
    } else {
        resolution.trim()
    };
    format!(
        "{}/anime/getvideo?chapterUrlId={}&reso={}",
        trim_base(base_url),
        chapter_url_id.trim(),
        resolution
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.sansekai.my.id/api";

    #[test]
    fn test_latest_url() {
        assert_eq!(latest_url(BASE, 2), "https://api.sansekai.my.id/api/anime/latest?page=2");
        assert_eq!(
            latest_url("http://localhost/api/", 1),
            "http://localhost/api/anime/latest?page=1"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        assert_eq!(
            search_url(BASE, "one piece & co", 3),
            "https://api.sansekai.my.id/api/anime/search?query=one+piece+%26+co&page=3"
        );
    }

    #[test]
    fn test_detail_url_sends_normalized_id() {
        assert_eq!(
            detail_url(BASE, "One Piece: Season 2"),
            "https://api.sansekai.my.id/api/anime/detail?urlId=one-piece%3a-season-2"
        );
    }

    #[test]
    fn test_movies_url() {
        assert_eq!(movies_url(BASE), "https://api.sansekai.my.id/api/anime/movie");
    }

    #[test]
    fn test_video_url_default_resolution() {
        assert_eq!(
            video_url(BASE, "one-piece-episode-1", ""),
            "https://api.sansekai.my.id/api/anime/getvideo?chapterUrlId=one-piece-episode-1&reso=720p"
        );
        assert!(video_url(BASE, "x", "1080p").ends_with("reso=1080p"));
    }
}
