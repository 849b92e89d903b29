//! Playback state - the single source of truth for a player
//!
//! Every control operation mutates this state; visual sync reads it.

use crate::types::PlaybackSpeed;
use crate::volume::Volume;
use serde::Serialize;
use std::collections::HashMap;

/// Mutable playback state of one player instance
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Index of the active song in the song collection
    pub(crate) active_index: usize,

    /// Playlist the active song is being played from
    pub(crate) active_playlist: Option<String>,

    /// Album of the active song (album change detection)
    pub(crate) active_album: Option<String>,

    /// Global shuffle flag
    pub(crate) shuffle_on: bool,

    /// Global shuffle order (empty while shuffle is off)
    pub(crate) shuffle_order: Vec<usize>,

    /// Position of the active song inside `shuffle_order`
    pub(crate) shuffle_position: usize,

    /// Shuffle orders of shuffled playlists, keyed by playlist id
    pub(crate) playlist_shuffles: HashMap<String, Vec<usize>>,

    /// Replay the active song when it ends
    pub(crate) repeat: bool,

    /// Playback rate
    pub(crate) playback_speed: PlaybackSpeed,

    /// Volume and pre-mute level
    pub(crate) volume: Volume,
}

impl PlaybackState {
    /// Index of the active song
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Active playlist id
    pub fn active_playlist(&self) -> Option<&str> {
        self.active_playlist.as_deref()
    }

    /// Album of the active song
    pub fn active_album(&self) -> Option<&str> {
        self.active_album.as_deref()
    }

    /// Whether global shuffle is on
    pub fn is_shuffled(&self) -> bool {
        self.shuffle_on
    }

    /// Global shuffle order
    pub fn shuffle_order(&self) -> &[usize] {
        &self.shuffle_order
    }

    /// Position of the active song in the global shuffle order
    pub fn shuffle_position(&self) -> usize {
        self.shuffle_position
    }

    /// Whether a playlist is shuffled
    pub fn is_playlist_shuffled(&self, id: &str) -> bool {
        self.playlist_shuffles.contains_key(id)
    }

    /// Shuffle order of a playlist, if it is shuffled
    pub fn playlist_shuffle_order(&self, id: &str) -> Option<&[usize]> {
        self.playlist_shuffles.get(id).map(Vec::as_slice)
    }

    /// Whether repeat is on
    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    /// Playback rate
    pub fn playback_speed(&self) -> PlaybackSpeed {
        self.playback_speed
    }

    /// Volume controller
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Make `index` the active song and keep the shuffle position in step
    pub(crate) fn set_active(&mut self, index: usize, playlist: Option<String>) {
        self.active_index = index;
        self.active_playlist = playlist;

        if self.shuffle_on {
            if let Some(position) = self.shuffle_order.iter().position(|&i| i == index) {
                self.shuffle_position = position;
            }
        }
    }
}
