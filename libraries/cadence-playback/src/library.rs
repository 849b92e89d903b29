//! Songs and playlists owned by a player instance

use crate::error::{PlaybackError, Result};
use crate::state::PlaybackState;
use cadence_core::{PlayerConfig, Playlist, Song};
use std::collections::BTreeMap;

/// The song collection and the playlists that index into it
#[derive(Debug, Clone, Default)]
pub struct Library {
    songs: Vec<Song>,
    playlists: BTreeMap<String, Playlist>,
}

impl Library {
    /// Copy songs and playlists out of a configuration
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            songs: config.songs.clone(),
            playlists: config.playlists.clone(),
        }
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// True when there are no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// All songs
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Song at an index
    pub fn song(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    /// Song at an index, as a playback error when missing
    pub fn require_song(&self, index: usize) -> Result<&Song> {
        self.songs
            .get(index)
            .ok_or(PlaybackError::SongOutOfRange(index))
    }

    /// Append a song and return its index
    pub fn push(&mut self, song: Song) -> usize {
        self.songs.push(song);
        self.songs.len() - 1
    }

    /// All playlists keyed by id
    pub fn playlists(&self) -> &BTreeMap<String, Playlist> {
        &self.playlists
    }

    /// Playlist by id
    pub fn playlist(&self, id: &str) -> Result<&Playlist> {
        self.playlists
            .get(id)
            .ok_or_else(|| PlaybackError::UnknownPlaylist(id.to_string()))
    }

    /// Order in which a playlist is navigated
    ///
    /// The playlist's shuffle order when it is shuffled, otherwise its song
    /// list. Entries that do not reference a song are left out.
    pub fn playlist_order(&self, id: &str, state: &PlaybackState) -> Result<Vec<usize>> {
        let playlist = self.playlist(id)?;

        let order = match state.playlist_shuffles.get(id) {
            Some(shuffled) => shuffled
                .iter()
                .copied()
                .filter(|&index| index < self.songs.len())
                .collect(),
            None => playlist.valid_songs(self.songs.len()),
        };

        Ok(order)
    }

    /// Order in which the whole collection is navigated
    pub fn global_order(&self, state: &PlaybackState) -> Vec<usize> {
        if state.shuffle_on && state.shuffle_order.len() == self.songs.len() {
            state.shuffle_order.clone()
        } else {
            (0..self.songs.len()).collect()
        }
    }
}
