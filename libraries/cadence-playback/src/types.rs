//! Core types for playback control

use crate::error::PlaybackError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playback speed
///
/// Only three rates are offered; cycling goes 1.0 → 1.5 → 2.0 → 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub enum PlaybackSpeed {
    /// 1.0x
    #[default]
    Normal,

    /// 1.5x
    OneAndHalf,

    /// 2.0x
    Double,
}

impl PlaybackSpeed {
    /// Playback rate multiplier
    pub fn as_f32(self) -> f32 {
        match self {
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::OneAndHalf => 1.5,
            PlaybackSpeed::Double => 2.0,
        }
    }

    /// The speed that follows this one in the cycle
    pub fn next(self) -> Self {
        match self {
            PlaybackSpeed::Normal => PlaybackSpeed::OneAndHalf,
            PlaybackSpeed::OneAndHalf => PlaybackSpeed::Double,
            PlaybackSpeed::Double => PlaybackSpeed::Normal,
        }
    }
}

impl TryFrom<f32> for PlaybackSpeed {
    type Error = PlaybackError;

    fn try_from(rate: f32) -> Result<Self, Self::Error> {
        if (rate - 1.0).abs() < f32::EPSILON {
            Ok(PlaybackSpeed::Normal)
        } else if (rate - 1.5).abs() < f32::EPSILON {
            Ok(PlaybackSpeed::OneAndHalf)
        } else if (rate - 2.0).abs() < f32::EPSILON {
            Ok(PlaybackSpeed::Double)
        } else {
            Err(PlaybackError::InvalidPlaybackSpeed(rate))
        }
    }
}

impl From<PlaybackSpeed> for f32 {
    fn from(speed: PlaybackSpeed) -> Self {
        speed.as_f32()
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.as_f32())
    }
}

/// Transport status of the active song
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportStatus {
    /// Position at 0, nothing playing
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-song
    Paused,
}

/// What the host environment can do
///
/// Supplied by the binding layer; the core never inspects user agents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Host can run Web Audio visualizations
    #[serde(default)]
    pub web_audio: bool,

    /// Host drops buffered remote audio and needs the source reloaded on
    /// play unless the user paused explicitly (mobile browsers)
    #[serde(default)]
    pub reconnect_on_play: bool,
}

impl Capabilities {
    /// Desktop browser with Web Audio
    pub fn desktop() -> Self {
        Self {
            web_audio: true,
            reconnect_on_play: false,
        }
    }

    /// Mobile browser with Web Audio
    pub fn mobile() -> Self {
        Self {
            web_audio: true,
            reconnect_on_play: true,
        }
    }
}

/// Which song (and playlist) a play-type control refers to
///
/// Both fields empty means the control follows whatever is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayTarget {
    /// Song index the control is bound to
    #[serde(default)]
    pub song: Option<usize>,

    /// Playlist the control is bound to
    #[serde(default)]
    pub playlist: Option<String>,
}

impl PlayTarget {
    /// Control bound to the active song
    pub fn main() -> Self {
        Self::default()
    }

    /// Control bound to one song
    pub fn song(index: usize) -> Self {
        Self {
            song: Some(index),
            playlist: None,
        }
    }

    /// Control bound to a whole playlist
    pub fn playlist(id: impl Into<String>) -> Self {
        Self {
            song: None,
            playlist: Some(id.into()),
        }
    }

    /// Control bound to one song inside a playlist
    pub fn song_in_playlist(index: usize, id: impl Into<String>) -> Self {
        Self {
            song: Some(index),
            playlist: Some(id.into()),
        }
    }
}

/// A user interaction forwarded by the binding layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    /// Play (switching song first when the target differs)
    Play(PlayTarget),

    /// Pause the active song
    Pause,

    /// Toggle play/pause, or switch to the target song and play
    PlayPause(PlayTarget),

    /// Stop and rewind the active song
    Stop,

    /// Next song, scoped to a playlist when given
    Next {
        #[serde(default)]
        playlist: Option<String>,
    },

    /// Previous song, scoped to a playlist when given
    Prev {
        #[serde(default)]
        playlist: Option<String>,
    },

    /// Toggle shuffle globally or for one playlist
    ToggleShuffle {
        #[serde(default)]
        playlist: Option<String>,
    },

    /// Toggle repeat
    ToggleRepeat,

    /// 1.0 → 1.5 → 2.0 → 1.0
    CyclePlaybackSpeed,

    /// Set volume (0-100)
    SetVolume { percent: u8 },

    /// Raise volume by the configured increment
    VolumeUp,

    /// Lower volume by the configured decrement
    VolumeDown,

    /// Mute, or restore the volume from before muting
    ToggleMute,

    /// Move within the active song (0-100)
    Seek {
        percent: f64,
        #[serde(default)]
        song: Option<usize>,
    },

    /// Jump to a song and a position in it
    SkipTo {
        song: usize,
        seconds: f64,
        #[serde(default)]
        playlist: Option<String>,
    },

    /// Media element reported the end of the song
    SongEnded,

    /// Media element reported a time update
    TimeUpdate,
}

/// Outcome of resolving a navigation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongChange {
    /// New active song index
    pub index: usize,

    /// New active playlist
    pub playlist: Option<String>,

    /// Per-song visuals (elapsed time, sliders) must be reset
    pub song_changed: bool,

    /// Active playlist differs from the previous one
    pub playlist_changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_speed_cycles() {
        let speed = PlaybackSpeed::default();
        assert_eq!(speed.as_f32(), 1.0);
        assert_eq!(speed.next(), PlaybackSpeed::OneAndHalf);
        assert_eq!(speed.next().next(), PlaybackSpeed::Double);
        assert_eq!(speed.next().next().next(), PlaybackSpeed::Normal);
    }

    #[test]
    fn playback_speed_from_rate() {
        assert_eq!(PlaybackSpeed::try_from(1.5).unwrap(), PlaybackSpeed::OneAndHalf);
        assert_eq!(PlaybackSpeed::try_from(2.0).unwrap(), PlaybackSpeed::Double);
        assert!(matches!(
            PlaybackSpeed::try_from(1.25),
            Err(PlaybackError::InvalidPlaybackSpeed(_))
        ));
    }

    #[test]
    fn command_json_shape() {
        let command: Command =
            serde_json::from_str(r#"{"action": "next", "playlist": "evening"}"#).unwrap();
        assert_eq!(
            command,
            Command::Next {
                playlist: Some("evening".to_string())
            }
        );

        let command: Command =
            serde_json::from_str(r#"{"action": "play_pause", "song": 3}"#).unwrap();
        assert_eq!(command, Command::PlayPause(PlayTarget::song(3)));

        let command: Command =
            serde_json::from_str(r#"{"action": "set_volume", "percent": 40}"#).unwrap();
        assert_eq!(command, Command::SetVolume { percent: 40 });
    }

    #[test]
    fn capabilities_presets() {
        assert!(!Capabilities::default().web_audio);
        assert!(Capabilities::desktop().web_audio);
        assert!(!Capabilities::desktop().reconnect_on_play);
        assert!(Capabilities::mobile().reconnect_on_play);
    }
}
