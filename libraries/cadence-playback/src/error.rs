//! Error types for playback control

use thiserror::Error;

/// Playback errors
///
/// None of these reach the binding layer through `Player::dispatch`; they are
/// logged (when debug is on) and queued as `PlaybackEvent::Error`.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The configuration contained no songs
    #[error("No songs configured")]
    MissingSongs,

    /// Navigation over an empty song collection or playlist
    #[error("Cannot navigate an empty collection")]
    EmptyCollection,

    /// Playlist id is not configured
    #[error("Unknown playlist: {0}")]
    UnknownPlaylist(String),

    /// Song index outside the song collection
    #[error("Song index out of range: {0}")]
    SongOutOfRange(usize),

    /// Song has no URL to hand to the media element
    #[error("Song has no URL: {0}")]
    MissingUrl(String),

    /// Remote resolution marked the song as unplayable
    #[error("Song is not streamable: {0}")]
    NotStreamable(String),

    /// Playback speed other than 1.0, 1.5 or 2.0
    #[error("Invalid playback speed: {0}")]
    InvalidPlaybackSpeed(f32),

    /// Callback name that does not match any player event
    #[error("Unknown callback event: {0}")]
    UnknownEvent(String),

    /// Visualization id that was never registered
    #[error("Unknown visualization: {0}")]
    UnknownVisualization(String),

    /// Configuration error from the core crate
    #[error(transparent)]
    Config(#[from] cadence_core::CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
