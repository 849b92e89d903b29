//! Resolve every SoundCloud song of a configuration before playback starts
//!
//! All requests are dispatched at once and awaited together. One failing
//! song never blocks or fails the others; it is listed in the report and
//! marked unstreamable.

use crate::client::TrackResolver;
use crate::error::{ResolveError, Result};
use crate::types::{is_soundcloud_url, SoundCloudTrack};
use cadence_core::{PlayerConfig, SoundCloudSettings, Song};
use futures_util::future::join_all;
use tracing::{info, warn};
use url::Url;

/// A song that could not be resolved
#[derive(Debug)]
pub struct ResolutionFailure {
    /// Index of the song in the collection
    pub index: usize,

    /// The SoundCloud page URL that was requested
    pub url: String,

    /// Why resolution failed
    pub error: ResolveError,
}

/// Outcome of resolving a song collection
#[derive(Debug, Default)]
pub struct ResolutionReport {
    /// Songs rewritten to a streamable URL
    pub resolved: Vec<usize>,

    /// Songs left unplayable
    pub failures: Vec<ResolutionFailure>,
}

impl ResolutionReport {
    /// Number of SoundCloud songs that were requested
    pub fn requested(&self) -> usize {
        self.resolved.len() + self.failures.len()
    }

    /// True when every request succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolve the SoundCloud songs of a collection in place
pub async fn resolve_songs<R>(
    songs: &mut [Song],
    resolver: &R,
    settings: &SoundCloudSettings,
) -> ResolutionReport
where
    R: TrackResolver + ?Sized,
{
    let pending: Vec<(usize, String)> = songs
        .iter()
        .enumerate()
        .filter(|(_, song)| is_soundcloud_url(&song.url))
        .map(|(index, song)| (index, song.url.clone()))
        .collect();

    let results = join_all(pending.iter().map(|(_, url)| resolver.resolve(url))).await;

    let mut report = ResolutionReport::default();

    for ((index, url), result) in pending.into_iter().zip(results) {
        let Some(song) = songs.get_mut(index) else {
            continue;
        };

        match result.and_then(|track| apply_track(song, track, settings)) {
            Ok(()) => report.resolved.push(index),
            Err(error) => {
                warn!(index, url = %url, error = %error, "SoundCloud resolution failed");
                song.streamable = false;
                report.failures.push(ResolutionFailure { index, url, error });
            }
        }
    }

    info!(
        resolved = report.resolved.len(),
        failed = report.failures.len(),
        "SoundCloud resolution finished"
    );

    report
}

/// Resolve a configuration's SoundCloud songs when SoundCloud is configured
///
/// Returns `None` when the configuration has no SoundCloud settings.
pub async fn prepare_config<R>(config: &mut PlayerConfig, resolver: &R) -> Option<ResolutionReport>
where
    R: TrackResolver + ?Sized,
{
    let settings = config.soundcloud.clone()?;
    Some(resolve_songs(&mut config.songs, resolver, &settings).await)
}

/// Rewrite a song from its resolved track
fn apply_track(song: &mut Song, track: SoundCloudTrack, settings: &SoundCloudSettings) -> Result<()> {
    if !track.streamable {
        return Err(ResolveError::NotStreamable {
            name: song.name.clone(),
            artist: song.artist.clone(),
        });
    }

    let stream_url = track
        .stream_url
        .as_deref()
        .ok_or_else(|| ResolveError::MissingStreamUrl(song.url.clone()))?;

    let mut url = Url::parse(stream_url)
        .map_err(|e| ResolveError::InvalidUrl(format!("{}: {}", stream_url, e)))?;
    url.query_pairs_mut()
        .append_pair("client_id", &settings.client_id);

    song.url = url.into();

    if settings.use_art {
        if let Some(artwork) = &track.artwork_url {
            song.cover_art_url = Some(artwork.clone());
        }
    }

    song.remote_metadata = serde_json::to_value(&track).ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(streamable: bool) -> SoundCloudTrack {
        serde_json::from_value(serde_json::json!({
            "id": 9,
            "streamable": streamable,
            "stream_url": "https://api.soundcloud.com/tracks/9/stream",
            "artwork_url": "https://i1.sndcdn.com/artworks-9.jpg"
        }))
        .unwrap()
    }

    fn settings(use_art: bool) -> SoundCloudSettings {
        SoundCloudSettings {
            client_id: "abc".to_string(),
            use_art,
        }
    }

    #[test]
    fn streamable_track_rewrites_song() {
        let mut song = Song::new("https://soundcloud.com/a/b", "B", "A").with_cover_art("/art/b.png");

        apply_track(&mut song, track(true), &settings(false)).unwrap();

        assert_eq!(song.url, "https://api.soundcloud.com/tracks/9/stream?client_id=abc");
        assert_eq!(song.cover_art_url.as_deref(), Some("/art/b.png"));
        assert_eq!(song.remote_metadata.unwrap()["id"], 9);
    }

    #[test]
    fn use_art_replaces_cover() {
        let mut song = Song::new("https://soundcloud.com/a/b", "B", "A").with_cover_art("/art/b.png");

        apply_track(&mut song, track(true), &settings(true)).unwrap();

        assert_eq!(
            song.cover_art_url.as_deref(),
            Some("https://i1.sndcdn.com/artworks-9.jpg")
        );
    }

    #[test]
    fn unstreamable_track_is_an_error() {
        let mut song = Song::new("https://soundcloud.com/a/b", "B", "A");

        let error = apply_track(&mut song, track(false), &settings(false)).unwrap_err();

        assert_eq!(error.to_string(), "B by A is not streamable by the SoundCloud API");
        assert_eq!(song.url, "https://soundcloud.com/a/b");
    }

    #[test]
    fn report_counts() {
        let report = ResolutionReport {
            resolved: vec![0, 2],
            failures: vec![ResolutionFailure {
                index: 1,
                url: "https://soundcloud.com/x".to_string(),
                error: ResolveError::MissingStreamUrl("x".to_string()),
            }],
        };

        assert_eq!(report.requested(), 3);
        assert!(!report.is_complete());
    }
}
