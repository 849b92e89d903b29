//! Transport control over a single media element
//!
//! Handles the per-song status machine and the source juggling live streams
//! need:
//! - live play reconnects (source set to the song URL, reloaded) first
//! - live pause and stop disconnect (source cleared, reloaded)
//! - seeking a live stream does nothing

use crate::media::MediaElement;
use crate::time::completion_percentage;
use crate::types::{PlaybackSpeed, TransportStatus};
use crate::volume::Volume;
use cadence_core::Song;
use tracing::trace;

/// Drives a `MediaElement` for one player
#[derive(Debug)]
pub struct Transport<M: MediaElement> {
    media: M,
    status: TransportStatus,
    paused_by_user: bool,
    reconnect_on_play: bool,
}

impl<M: MediaElement> Transport<M> {
    /// Wrap a media element
    ///
    /// `reconnect_on_play` comes from the host capabilities (mobile browsers
    /// drop buffered remote audio).
    pub fn new(media: M, reconnect_on_play: bool) -> Self {
        Self {
            media,
            status: TransportStatus::Stopped,
            paused_by_user: false,
            reconnect_on_play,
        }
    }

    /// Current status
    pub fn status(&self) -> TransportStatus {
        self.status
    }

    /// Whether the active song is playing
    pub fn is_playing(&self) -> bool {
        self.status == TransportStatus::Playing
    }

    /// The wrapped media element
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Mutable access to the media element
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Point the element at a song without playing it
    pub fn load(&mut self, song: &Song) {
        self.media.set_source(&song.url);
        self.media.load();
        self.paused_by_user = false;
    }

    /// Start or resume playback of `song`
    pub fn play(&mut self, song: &Song, speed: PlaybackSpeed) {
        if song.live || (self.reconnect_on_play && !self.paused_by_user) {
            self.reconnect(song);
        }

        self.media.play();
        self.media.set_playback_rate(speed.as_f32());
        self.status = TransportStatus::Playing;
        self.paused_by_user = false;
    }

    /// Pause playback of `song`
    pub fn pause(&mut self, song: &Song) {
        self.media.pause();
        self.status = TransportStatus::Paused;
        self.paused_by_user = true;

        if song.live {
            self.disconnect();
        }
    }

    /// Stop playback of `song` and rewind it
    pub fn stop(&mut self, song: &Song) {
        if self.media.duration().is_finite() {
            self.media.set_current_time(0.0);
        }
        self.media.pause();
        self.status = TransportStatus::Stopped;
        self.paused_by_user = false;

        if song.live {
            self.disconnect();
        }
    }

    /// Move to `percent` (0-100) of the song
    ///
    /// Ignored for live streams and while the duration is unknown.
    pub fn seek(&mut self, song: &Song, percent: f64) {
        if song.live {
            return;
        }

        let duration = self.media.duration();
        if !duration.is_finite() || duration <= 0.0 || !percent.is_finite() {
            return;
        }

        self.media
            .set_current_time(duration * percent.clamp(0.0, 100.0) / 100.0);
    }

    /// Move to an absolute position in seconds
    pub fn seek_seconds(&mut self, song: &Song, seconds: f64) {
        if song.live || !seconds.is_finite() {
            return;
        }
        self.media.set_current_time(seconds.max(0.0));
    }

    /// Push a volume level to the element
    pub fn apply_volume(&mut self, volume: &Volume) {
        self.media.set_volume(volume.level());
    }

    /// Apply a playback rate
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.media.set_playback_rate(speed.as_f32());
    }

    /// Elapsed seconds and duration as reported by the element
    pub fn position(&self) -> (f64, f64) {
        (self.media.current_time(), self.media.duration())
    }

    /// Completion of the current song (0-100)
    pub fn completion(&self) -> f64 {
        completion_percentage(self.media.current_time(), self.media.duration())
    }

    /// Status after the element reported the end of the song
    pub fn mark_ended(&mut self) {
        self.status = TransportStatus::Stopped;
    }

    fn reconnect(&mut self, song: &Song) {
        trace!(url = %song.url, "Reconnecting source");
        self.media.set_source(&song.url);
        self.media.load();
    }

    fn disconnect(&mut self) {
        trace!("Disconnecting live source");
        self.media.clear_source();
        self.media.load();
    }
}
