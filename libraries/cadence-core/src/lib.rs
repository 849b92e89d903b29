//! Cadence Core
//!
//! Platform-agnostic data model and configuration for the Cadence player.
//!
//! This crate provides the building blocks shared by the playback controller,
//! the remote resolvers and the drivers:
//! - **Domain Types**: `Song`, `Playlist`, `PlaylistIssue`
//! - **Configuration**: `PlayerConfig` with file/environment loading
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Playlist, PlayerConfig, Song};
//!
//! let mut config = PlayerConfig::default();
//! config.songs.push(Song::new("https://cdn.example.com/one.mp3", "One", "Band"));
//! config.songs.push(Song::new("https://cdn.example.com/two.mp3", "Two", "Band"));
//! config.add_playlist(Playlist::new("favorites", vec![1, 0]));
//!
//! let issues = config.validate().unwrap();
//! assert!(issues.is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{PlayerConfig, SoundCloudSettings, VisualizationBackup};
pub use error::{CoreError, Result};
pub use types::{Playlist, PlaylistIssue, Song};
