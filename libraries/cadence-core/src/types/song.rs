/// Song domain type
use serde::{Deserialize, Serialize};

/// A playable song
///
/// Songs are loaded from configuration and stay immutable afterwards, except
/// for remote resolution which may rewrite `url` and `cover_art_url`, attach
/// `remote_metadata`, or clear `streamable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Source URL handed to the media element
    #[serde(default)]
    pub url: String,

    /// Song title
    #[serde(default)]
    pub name: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Album name (optional)
    #[serde(default)]
    pub album: Option<String>,

    /// Live stream (cannot be scrubbed, reconnects on play)
    #[serde(default)]
    pub live: bool,

    /// Cover art URL (optional)
    #[serde(default)]
    pub cover_art_url: Option<String>,

    /// Visualization to activate while this song plays (optional)
    #[serde(default)]
    pub visualization: Option<String>,

    /// False once remote resolution reported the URL as unplayable
    #[serde(default = "default_streamable")]
    pub streamable: bool,

    /// Extra metadata attached by a remote resolver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_metadata: Option<serde_json::Value>,
}

fn default_streamable() -> bool {
    true
}

impl Song {
    /// Create a new song
    pub fn new(url: impl Into<String>, name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            artist: artist.into(),
            album: None,
            live: false,
            cover_art_url: None,
            visualization: None,
            streamable: true,
            remote_metadata: None,
        }
    }

    /// Set the album
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the cover art URL
    pub fn with_cover_art(mut self, url: impl Into<String>) -> Self {
        self.cover_art_url = Some(url.into());
        self
    }

    /// Mark the song as a live stream
    pub fn live(mut self) -> Self {
        self.live = true;
        self
    }

    /// Whether the song has a non-empty URL
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Whether the transport may be asked to play this song
    pub fn is_playable(&self) -> bool {
        self.has_url() && self.streamable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let song = Song::new("https://cdn.example.com/a.mp3", "A", "Artist")
            .with_album("Album")
            .with_cover_art("https://cdn.example.com/a.png")
            .live();

        assert_eq!(song.album.as_deref(), Some("Album"));
        assert_eq!(song.cover_art_url.as_deref(), Some("https://cdn.example.com/a.png"));
        assert!(song.live);
        assert!(song.is_playable());
    }

    #[test]
    fn blank_url_is_not_playable() {
        let song = Song::new("   ", "Silent", "Nobody");
        assert!(!song.has_url());
        assert!(!song.is_playable());
    }

    #[test]
    fn deserialize_defaults() {
        let song: Song = serde_json::from_str(r#"{"url": "x.mp3", "name": "X"}"#).unwrap();
        assert!(song.streamable);
        assert!(!song.live);
        assert!(song.album.is_none());
        assert!(song.remote_metadata.is_none());
    }
}
