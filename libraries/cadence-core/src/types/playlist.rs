/// Playlist domain types
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered selection of songs from the top-level song collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist identifier (the key it is configured under)
    #[serde(default)]
    pub id: String,

    /// Display name (optional)
    #[serde(default)]
    pub name: Option<String>,

    /// Indices into the song collection, in playback order
    #[serde(default)]
    pub songs: Vec<usize>,
}

impl Playlist {
    /// Create a new playlist
    pub fn new(id: impl Into<String>, songs: Vec<usize>) -> Self {
        Self {
            id: id.into(),
            name: None,
            songs,
        }
    }

    /// Song indices that reference an existing song, in order
    pub fn valid_songs(&self, song_count: usize) -> Vec<usize> {
        self.songs
            .iter()
            .copied()
            .filter(|&index| index < song_count)
            .collect()
    }

    /// Report every entry that points outside the song collection
    pub fn validate(&self, song_count: usize) -> Vec<PlaylistIssue> {
        self.songs
            .iter()
            .enumerate()
            .filter(|(_, &index)| index >= song_count)
            .map(|(position, &song_index)| PlaylistIssue {
                playlist: self.id.clone(),
                position,
                song_index,
            })
            .collect()
    }
}

/// A playlist entry that references a song which does not exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistIssue {
    /// Playlist identifier
    pub playlist: String,

    /// Position of the entry inside the playlist
    pub position: usize,

    /// The out-of-range song index
    pub song_index: usize,
}

impl fmt::Display for PlaylistIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "song index {} at position {} in playlist '{}' is not defined in the songs list",
            self.song_index, self.position, self.playlist
        )
    }
}
