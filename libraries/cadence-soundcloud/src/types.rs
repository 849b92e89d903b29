//! SoundCloud API types.

use serde::{Deserialize, Serialize};
use url::Url;

/// Hosts whose track pages can be resolved
const SOUNDCLOUD_HOSTS: [&str; 2] = ["soundcloud.com", "snd.sc"];

/// A track as returned by the `/resolve` endpoint.
///
/// Only the fields the player uses are typed; everything else the API sends
/// is kept in `extra` so it can be attached to the song as metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundCloudTrack {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub streamable: bool,

    #[serde(default)]
    pub stream_url: Option<String>,

    #[serde(default)]
    pub artwork_url: Option<String>,

    #[serde(default)]
    pub permalink_url: Option<String>,

    /// Track length in milliseconds
    #[serde(default)]
    pub duration: Option<u64>,

    #[serde(default)]
    pub user: Option<SoundCloudUser>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Uploader of a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundCloudUser {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub username: Option<String>,
}

/// Check whether a song URL points at a SoundCloud page.
///
/// Matches `http(s)://soundcloud.com/...` and `http(s)://snd.sc/...`.
pub fn is_soundcloud_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    matches!(parsed.scheme(), "http" | "https")
        && parsed
            .host_str()
            .is_some_and(|host| SOUNDCLOUD_HOSTS.contains(&host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_soundcloud_urls() {
        assert!(is_soundcloud_url("https://soundcloud.com/artist/track"));
        assert!(is_soundcloud_url("http://soundcloud.com/artist/track"));
        assert!(is_soundcloud_url("https://snd.sc/abc123"));
    }

    #[test]
    fn rejects_other_urls() {
        assert!(!is_soundcloud_url("https://cdn.example.com/soundcloud.com/a.mp3"));
        assert!(!is_soundcloud_url("ftp://soundcloud.com/artist/track"));
        assert!(!is_soundcloud_url("https://api.soundcloud.com/tracks/1"));
        assert!(!is_soundcloud_url("/music/local.mp3"));
        assert!(!is_soundcloud_url(""));
    }

    #[test]
    fn unknown_fields_are_kept() {
        let track: SoundCloudTrack = serde_json::from_str(
            r#"{
                "id": 42,
                "title": "Tide",
                "streamable": true,
                "stream_url": "https://api.soundcloud.com/tracks/42/stream",
                "genre": "Ambient",
                "user": {"id": 7, "username": "shore"}
            }"#,
        )
        .unwrap();

        assert_eq!(track.id, Some(42));
        assert!(track.streamable);
        assert_eq!(track.extra["genre"], "Ambient");
        assert_eq!(track.user.unwrap().username.as_deref(), Some("shore"));
    }

    #[test]
    fn missing_streamable_means_not_streamable() {
        let track: SoundCloudTrack = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(!track.streamable);
        assert!(track.stream_url.is_none());
    }
}
