//! # Video Identifier Parsing
//!
//! Derives the short video token from the URL shapes the site hands out:
//! short links, watch pages, embeds and the legacy `/v/` player path.

use serde::Serialize;
use std::fmt;
use tracing::debug;
use url::Url;

const SHORT_LINK_HOSTS: &[&str] = &["youtu.be"];
const CANONICAL_HOSTS: &[&str] = &["www.youtube.com", "youtube.com"];

/// Thumbnail qualities, best first.
pub const THUMBNAIL_QUALITIES: &[&str] = &["maxresdefault", "hqdefault", "mqdefault", "default"];

/// A parsed video identifier. Never empty, never contains `&`, `?` or `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Validates a raw token, e.g. one taken from a request path.
    pub fn new(raw: &str) -> Option<Self> {
        let token = raw.split(['&', '?']).next().unwrap_or_default().trim();
        if token.is_empty() || token.contains('/') {
            return None;
        }
        Some(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Candidate thumbnail URLs under `base`, in preference order.
    pub fn thumbnail_urls(&self, base: &str) -> Vec<String> {
        let base = base.trim_end_matches('/');
        THUMBNAIL_QUALITIES
            .iter()
            .map(|quality| format!("{base}/{}/{quality}.jpg", self.0))
            .collect()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the video identifier from any supported URL shape.
///
/// Returns `None` for unsupported hosts, missing identifiers, or URLs that do
/// not parse at all.
pub fn parse_video_id(url: &str) -> Option<VideoId> {
    let parsed = match Url::parse(url.trim()) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Error extracting video ID from '{url}': {e}");
            return None;
        }
    };
    let host = parsed.host_str()?.to_ascii_lowercase();
    let path = parsed.path();

    let raw: Option<String> = if SHORT_LINK_HOSTS.contains(&host.as_str()) {
        path.strip_prefix('/').map(str::to_string)
    } else if CANONICAL_HOSTS.contains(&host.as_str()) {
        if path.contains("/watch") {
            parsed
                .query_pairs()
                .find_map(|(key, value)| (key == "v").then(|| value.into_owned()))
        } else if let Some((_, id)) = path.split_once("/embed/") {
            Some(id.to_string())
        } else if let Some((_, id)) = path.split_once("/v/") {
            Some(id.to_string())
        } else {
            None
        }
    } else {
        None
    };

    // The path segment never carries the query, but a mangled URL can still
    // smuggle separators into the token itself.
    VideoId::new(&raw?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(url: &str) -> Option<String> {
        parse_video_id(url).map(|v| v.to_string())
    }

    #[test]
    fn test_short_link() {
        assert_eq!(id("https://youtu.be/abc123"), Some("abc123".to_string()));
        assert_eq!(id("https://youtu.be/abc123?t=5"), Some("abc123".to_string()));
    }

    #[test]
    fn test_watch_page() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=xyz789&t=30"),
            Some("xyz789".to_string())
        );
        assert_eq!(
            id("https://youtube.com/watch?feature=share&v=xyz789"),
            Some("xyz789".to_string())
        );
        assert_eq!(id("https://www.youtube.com/watch?t=30"), None);
    }

    #[test]
    fn test_embed_and_legacy_player() {
        assert_eq!(
            id("https://www.youtube.com/embed/qq111?x=1"),
            Some("qq111".to_string())
        );
        assert_eq!(id("https://www.youtube.com/v/vv222"), Some("vv222".to_string()));
    }

    #[test]
    fn test_separators_are_stripped_from_the_token() {
        assert_eq!(
            id("https://www.youtube.com/embed/qq111&autoplay=1"),
            Some("qq111".to_string())
        );
    }

    #[test]
    fn test_nested_path_is_not_an_identifier() {
        assert_eq!(id("https://youtu.be/a/b"), None);
        assert_eq!(id("https://www.youtube.com/embed/qq111/extra"), None);
    }

    #[test]
    fn test_unsupported_shapes() {
        assert_eq!(id("https://example.com/video"), None);
        assert_eq!(id("https://www.youtube.com/channel/UC123"), None);
        assert_eq!(id("https://youtu.be/"), None);
        assert_eq!(id("not a url"), None);
        assert_eq!(id(""), None);
    }

    #[test]
    fn test_thumbnail_urls_in_preference_order() {
        let video = VideoId::new("abc123").unwrap();
        let urls = video.thumbnail_urls("https://img.youtube.com/vi/");
        assert_eq!(
            urls,
            vec![
                "https://img.youtube.com/vi/abc123/maxresdefault.jpg",
                "https://img.youtube.com/vi/abc123/hqdefault.jpg",
                "https://img.youtube.com/vi/abc123/mqdefault.jpg",
                "https://img.youtube.com/vi/abc123/default.jpg",
            ]
        );
    }

    #[test]
    fn test_video_id_new_validates() {
        assert!(VideoId::new("").is_none());
        assert!(VideoId::new("a/b").is_none());
        assert_eq!(VideoId::new("abc&x=1").unwrap().as_str(), "abc");
    }
}
