//! Cadence - Playback Control
//!
//! Platform-agnostic controller for a declarative audio player.
//!
//! This crate provides:
//! - Playback state shared by every control of one player
//! - Next/previous resolution over the song collection or a playlist
//! - Global and per-playlist shuffle (Fisher-Yates)
//! - Time formatting for elapsed/duration displays
//! - Transport control with live stream reconnect/disconnect
//! - Volume with reversible mute
//! - Lifecycle callbacks and change events for visual sync
//!
//! # Architecture
//!
//! `cadence-playback` never touches the DOM:
//! - The audio element is reached through the `MediaElement` trait
//! - User interactions arrive as typed `Command`s
//! - Host features arrive as `Capabilities`
//! - Visual updates leave as `PlaybackEvent`s
//!
//! The `wasm` feature adds browser bindings over `HtmlAudioElement`.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cadence_core::{PlayerConfig, Playlist, Song};
//! use cadence_playback::{HeadlessElement, Player, TransportStatus};
//!
//! let mut config = PlayerConfig::default();
//! config.songs.push(Song::new("/music/one.mp3", "One", "Artist"));
//! config.songs.push(Song::new("/music/two.mp3", "Two", "Artist"));
//! config.add_playlist(Playlist::new("all", vec![0, 1]));
//!
//! let mut player = Player::new(config, HeadlessElement::new()).unwrap();
//!
//! player.play().unwrap();
//! assert_eq!(player.status(), TransportStatus::Playing);
//!
//! player.next(Some("all")).unwrap();
//! assert_eq!(player.state().active_index(), 1);
//! assert_eq!(player.state().active_playlist(), Some("all"));
//! ```
//!
//! # Example: Commands and Callbacks
//!
//! ```rust
//! use cadence_core::{PlayerConfig, Song};
//! use cadence_playback::{Command, HeadlessElement, PlayTarget, Player, PlayerEvent};
//!
//! let mut config = PlayerConfig::default();
//! config.songs.push(Song::new("/music/one.mp3", "One", "Artist"));
//!
//! let mut player = Player::builder(config, HeadlessElement::new())
//!     .callback(PlayerEvent::AfterPlay, |ctx| println!("playing {}", ctx.active_index))
//!     .build()
//!     .unwrap();
//!
//! player.dispatch(Command::PlayPause(PlayTarget::main()));
//! player.dispatch(Command::SetVolume { percent: 30 });
//!
//! for event in player.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```

mod callbacks;
mod error;
mod events;
mod library;
mod media;
mod player;
mod resolver;
mod shuffle;
mod state;
pub mod time;
mod transport;
pub mod types;
mod visualization;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use callbacks::{Callback, CallbackContext, CallbackRegistry, PlayerEvent};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use library::Library;
pub use media::{HeadlessElement, MediaElement};
pub use player::{Player, PlayerBuilder};
pub use resolver::{resolve_next, resolve_playlist_start, resolve_prev, resolve_song};
pub use shuffle::ShuffleEngine;
pub use state::PlaybackState;
pub use time::{completion_percentage, format_time, FormattedTime, TimeUpdate};
pub use transport::Transport;
pub use types::{
    Capabilities, Command, PlayTarget, PlaybackSpeed, SongChange, TransportStatus,
};
pub use visualization::{VisualizationFallback, VisualizationRegistry};
pub use volume::Volume;
