//! Playback Events
//!
//! Change notifications for visual synchronization. The player queues one
//! event per observable change; the binding layer drains the queue after each
//! interaction and redraws what changed:
//! - Transport status (play/pause/stop buttons)
//! - Active song and playlist (metadata, per-song sliders)
//! - Volume, shuffle, repeat and speed indicators
//! - Time displays and song sliders

use crate::time::TimeUpdate;
use crate::types::{PlaybackSpeed, TransportStatus};
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Transport status changed
    StateChanged {
        /// The new status
        status: TransportStatus,
    },

    /// Active song changed; per-song visuals must be reset
    SongChanged {
        /// New active song
        index: usize,
        /// Song that was active before
        previous_index: usize,
        /// Playlist the new song plays from
        playlist: Option<String>,
    },

    /// Active playlist changed
    PlaylistChanged {
        /// New active playlist
        playlist: Option<String>,
        /// Playlist that was active before
        previous: Option<String>,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        muted: bool,
    },

    /// Shuffle toggled, globally or for one playlist
    ShuffleChanged {
        /// Playlist id, `None` for global shuffle
        playlist: Option<String>,
        /// Shuffle state afterwards
        enabled: bool,
    },

    /// Repeat toggled
    RepeatChanged {
        /// Repeat state afterwards
        enabled: bool,
    },

    /// Playback speed changed
    SpeedChanged {
        /// New speed
        speed: PlaybackSpeed,
    },

    /// Media element reported progress
    TimeUpdated(TimeUpdate),

    /// An operation failed
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Whether this event is a failure report
    pub fn is_error(&self) -> bool {
        matches!(self, PlaybackEvent::Error { .. })
    }
}
