//! Tests for collection resolution.

use async_trait::async_trait;
use cadence_core::{PlayerConfig, SoundCloudSettings, Song};
use cadence_soundcloud::{
    prepare_config, resolve_songs, ResolveError, SoundCloudClient, SoundCloudTrack, TrackResolver,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

/// Resolver answering from a fixed table and recording requests
#[derive(Default)]
struct FakeResolver {
    tracks: HashMap<String, serde_json::Value>,
    requests: Mutex<Vec<String>>,
}

impl FakeResolver {
    fn with(mut self, url: &str, body: serde_json::Value) -> Self {
        self.tracks.insert(url.to_string(), body);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackResolver for FakeResolver {
    async fn resolve(&self, url: &str) -> cadence_soundcloud::Result<SoundCloudTrack> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.tracks.get(url) {
            Some(body) => Ok(serde_json::from_value(body.clone()).unwrap()),
            None => Err(ResolveError::ServerError {
                status: 404,
                message: "Not Found".to_string(),
            }),
        }
    }
}

fn streamable(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "streamable": true,
        "stream_url": format!("https://api.soundcloud.com/tracks/{}/stream", id),
        "artwork_url": format!("https://i1.sndcdn.com/artworks-{}.jpg", id)
    })
}

fn settings(use_art: bool) -> SoundCloudSettings {
    SoundCloudSettings {
        client_id: "abc".to_string(),
        use_art,
    }
}

// =============================================================================
// Collection Resolution
// =============================================================================

mod collection {
    use super::*;

    #[tokio::test]
    async fn test_only_soundcloud_songs_requested() {
        let resolver = FakeResolver::default()
            .with("https://soundcloud.com/a/one", streamable(1))
            .with("https://snd.sc/two", streamable(2));

        let mut songs = vec![
            Song::new("https://soundcloud.com/a/one", "One", "A"),
            Song::new("https://cdn.example.com/local.mp3", "Local", "B"),
            Song::new("https://snd.sc/two", "Two", "A"),
        ];

        let report = resolve_songs(&mut songs, &resolver, &settings(false)).await;

        assert_eq!(report.resolved, vec![0, 2]);
        assert!(report.is_complete());
        assert_eq!(resolver.requests().len(), 2);

        assert_eq!(songs[0].url, "https://api.soundcloud.com/tracks/1/stream?client_id=abc");
        assert_eq!(songs[1].url, "https://cdn.example.com/local.mp3");
        assert!(songs[1].remote_metadata.is_none());
        assert_eq!(songs[2].url, "https://api.soundcloud.com/tracks/2/stream?client_id=abc");
    }

    #[tokio::test]
    async fn test_art_replaced_only_when_enabled() {
        let resolver =
            FakeResolver::default().with("https://soundcloud.com/a/one", streamable(1));

        let mut kept = vec![Song::new("https://soundcloud.com/a/one", "One", "A").with_cover_art("/one.png")];
        resolve_songs(&mut kept, &resolver, &settings(false)).await;
        assert_eq!(kept[0].cover_art_url.as_deref(), Some("/one.png"));

        let mut replaced = vec![Song::new("https://soundcloud.com/a/one", "One", "A").with_cover_art("/one.png")];
        resolve_songs(&mut replaced, &resolver, &settings(true)).await;
        assert_eq!(
            replaced[0].cover_art_url.as_deref(),
            Some("https://i1.sndcdn.com/artworks-1.jpg")
        );
    }

    #[tokio::test]
    async fn test_failures_do_not_block_others() {
        let resolver = FakeResolver::default()
            .with("https://soundcloud.com/a/one", streamable(1))
            .with(
                "https://soundcloud.com/a/private",
                json!({ "id": 3, "streamable": false }),
            );

        let mut songs = vec![
            Song::new("https://soundcloud.com/a/private", "Private", "A"),
            Song::new("https://soundcloud.com/a/missing", "Missing", "A"),
            Song::new("https://soundcloud.com/a/one", "One", "A"),
        ];

        let report = resolve_songs(&mut songs, &resolver, &settings(false)).await;

        assert_eq!(report.resolved, vec![2]);
        assert_eq!(report.requested(), 3);
        assert_eq!(report.failures.len(), 2);

        let private = &report.failures[0];
        assert_eq!(private.index, 0);
        assert_eq!(
            private.error.to_string(),
            "Private by A is not streamable by the SoundCloud API"
        );
        assert!(matches!(
            report.failures[1].error,
            ResolveError::ServerError { status: 404, .. }
        ));

        assert!(!songs[0].streamable);
        assert!(!songs[1].streamable);
        assert!(songs[2].streamable);
    }

    #[tokio::test]
    async fn test_metadata_attached() {
        let resolver =
            FakeResolver::default().with("https://soundcloud.com/a/one", streamable(1));
        let mut songs = vec![Song::new("https://soundcloud.com/a/one", "One", "A")];

        resolve_songs(&mut songs, &resolver, &settings(false)).await;

        let metadata = songs[0].remote_metadata.as_ref().unwrap();
        assert_eq!(metadata["id"], 1);
        assert_eq!(metadata["streamable"], true);
    }
}

// =============================================================================
// Config Preparation
// =============================================================================

mod config {
    use super::*;

    #[tokio::test]
    async fn test_without_settings_does_nothing() {
        let resolver =
            FakeResolver::default().with("https://soundcloud.com/a/one", streamable(1));
        let mut config = PlayerConfig::default();
        config.songs.push(Song::new("https://soundcloud.com/a/one", "One", "A"));

        assert!(prepare_config(&mut config, &resolver).await.is_none());
        assert!(resolver.requests().is_empty());
        assert_eq!(config.songs[0].url, "https://soundcloud.com/a/one");
    }

    #[tokio::test]
    async fn test_end_to_end_with_mock_server() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("url", "https://soundcloud.com/a/one"))
            .and(query_param("client_id", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(streamable(1)))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = PlayerConfig::default();
        config.soundcloud = Some(settings(true));
        config.songs.push(Song::new("https://soundcloud.com/a/one", "One", "A"));
        config.songs.push(Song::new("/music/two.mp3", "Two", "B"));

        let client = SoundCloudClient::with_api_base("abc", &server.uri()).unwrap();
        let report = prepare_config(&mut config, &client).await.unwrap();

        assert_eq!(report.resolved, vec![0]);
        assert_eq!(
            config.songs[0].url,
            "https://api.soundcloud.com/tracks/1/stream?client_id=abc"
        );
        assert_eq!(
            config.songs[0].cover_art_url.as_deref(),
            Some("https://i1.sndcdn.com/artworks-1.jpg")
        );
        assert_eq!(config.songs[1].url, "/music/two.mp3");
    }
}
