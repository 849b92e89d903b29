//! Player configuration
//!
//! `PlayerConfig` is what a page (or any other host) hands to the player on
//! initialization. It can be built in code, parsed from JSON, or layered from
//! a config file plus `CADENCE__*` environment variables.

use crate::error::{CoreError, Result};
use crate::types::{Playlist, PlaylistIssue, Song};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Configuration for a player instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// All songs known to the player, addressed by index
    #[serde(default)]
    pub songs: Vec<Song>,

    /// Playlists keyed by id
    #[serde(default)]
    pub playlists: BTreeMap<String, Playlist>,

    /// Index of the song that is active after init (default: 0)
    #[serde(default)]
    pub start_song: Option<usize>,

    /// Initial volume in 0.0..=1.0 (default: 0.5)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Percentage added by "volume up" (default: 5)
    #[serde(default = "default_volume_step")]
    pub volume_increment: u8,

    /// Percentage removed by "volume down" (default: 5)
    #[serde(default = "default_volume_step")]
    pub volume_decrement: u8,

    /// Initial playback speed: 1.0, 1.5 or 2.0 (default: 1.0)
    #[serde(default = "default_playback_speed")]
    pub playback_speed: f32,

    /// Replay the active song when it ends (default: false)
    #[serde(default)]
    pub repeat: bool,

    /// Start with the song collection shuffled (default: false)
    #[serde(default)]
    pub shuffle: bool,

    /// Cover art shown when the active song has none
    #[serde(default)]
    pub default_album_art: Option<String>,

    /// What replaces a visualization when the host cannot run one
    #[serde(default)]
    pub visualization_backup: VisualizationBackup,

    /// Log configuration and playback warnings
    #[serde(default)]
    pub debug: bool,

    /// SoundCloud resolution settings (optional)
    #[serde(default)]
    pub soundcloud: Option<SoundCloudSettings>,
}

/// Replacement shown for a visualization the host cannot render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizationBackup {
    /// Remove the visualization element
    #[default]
    Nothing,

    /// Show the active song's cover art instead
    AlbumArt,
}

/// SoundCloud client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundCloudSettings {
    /// API client id appended to resolved stream URLs
    pub client_id: String,

    /// Replace cover art with SoundCloud artwork
    #[serde(default)]
    pub use_art: bool,
}

fn default_volume() -> f32 {
    0.5
}

fn default_volume_step() -> u8 {
    5
}

fn default_playback_speed() -> f32 {
    1.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            songs: Vec::new(),
            playlists: BTreeMap::new(),
            start_song: None,
            volume: default_volume(),
            volume_increment: default_volume_step(),
            volume_decrement: default_volume_step(),
            playback_speed: default_playback_speed(),
            repeat: false,
            shuffle: false,
            default_album_art: None,
            visualization_backup: VisualizationBackup::default(),
            debug: false,
            soundcloud: None,
        }
    }
}

impl PlayerConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: PlayerConfig = serde_json::from_str(json)?;
        config.normalize();
        Ok(config)
    }

    /// Load configuration from an optional file and the environment
    ///
    /// The file format follows its extension (json, toml, yaml). Environment
    /// variables prefixed with `CADENCE__` override file values, using `__`
    /// between nested keys (e.g. `CADENCE__DEBUG=true`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = ::config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(CoreError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(::config::File::from(path));
        }

        settings = settings.add_source(
            ::config::Environment::with_prefix("CADENCE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: PlayerConfig = settings.build()?.try_deserialize()?;
        config.normalize();
        Ok(config)
    }

    /// Insert or replace a playlist under its own id
    pub fn add_playlist(&mut self, playlist: Playlist) {
        self.playlists.insert(playlist.id.clone(), playlist);
    }

    /// Make every playlist carry the id it is keyed under
    pub fn normalize(&mut self) {
        for (id, playlist) in &mut self.playlists {
            if playlist.id != *id {
                playlist.id.clone_from(id);
            }
        }
    }

    /// Check the configuration before a player is built from it
    ///
    /// An empty song list is fatal. Playlist entries pointing at songs that
    /// do not exist are returned as issues; the playlists stay usable and the
    /// invalid entries are skipped during playback. Each issue is logged
    /// when `debug` is set.
    pub fn validate(&self) -> Result<Vec<PlaylistIssue>> {
        if self.songs.is_empty() {
            return Err(CoreError::MissingSongs);
        }

        let issues: Vec<PlaylistIssue> = self
            .playlists
            .values()
            .flat_map(|playlist| playlist.validate(self.songs.len()))
            .collect();

        if self.debug {
            for issue in &issues {
                warn!(
                    playlist = %issue.playlist,
                    position = issue.position,
                    song_index = issue.song_index,
                    "Playlist references a song that does not exist"
                );
            }
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.volume, 0.5);
        assert_eq!(config.volume_increment, 5);
        assert_eq!(config.volume_decrement, 5);
        assert_eq!(config.playback_speed, 1.0);
        assert_eq!(config.visualization_backup, VisualizationBackup::Nothing);
        assert!(!config.repeat);
        assert!(!config.shuffle);
        assert!(!config.debug);
    }

    #[test]
    fn from_json_fills_playlist_ids() {
        let config = PlayerConfig::from_json(
            r#"{
                "songs": [{"url": "a.mp3", "name": "A"}, {"url": "b.mp3", "name": "B"}],
                "playlists": {"evening": {"songs": [1, 0]}},
                "visualization_backup": "album-art",
                "volume": 0.8
            }"#,
        )
        .unwrap();

        assert_eq!(config.playlists["evening"].id, "evening");
        assert_eq!(config.playlists["evening"].songs, vec![1, 0]);
        assert_eq!(config.visualization_backup, VisualizationBackup::AlbumArt);
        assert_eq!(config.volume, 0.8);
    }

    #[test]
    fn validate_requires_songs() {
        let config = PlayerConfig::default();
        assert!(matches!(config.validate(), Err(CoreError::MissingSongs)));
    }

    #[test]
    fn validate_collects_playlist_issues() {
        let mut config = PlayerConfig::default();
        config.songs.push(Song::new("a.mp3", "A", "X"));
        config.add_playlist(Playlist::new("one", vec![0, 4]));
        config.add_playlist(Playlist::new("two", vec![9]));

        let issues = config.validate().unwrap();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.playlist == "one" && i.song_index == 4));
        assert!(issues.iter().any(|i| i.playlist == "two" && i.song_index == 9));
    }

    /// Run `f` with a subscriber writing plain log lines into a buffer
    fn captured_logs(f: impl FnOnce()) -> String {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Buffer {
            fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(bytes);
                Ok(bytes.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer(Arc::new(Mutex::new(Vec::new())));
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn validate_logs_issues_only_in_debug() {
        let mut config = PlayerConfig::default();
        config.songs.push(Song::new("a.mp3", "A", "X"));
        config.add_playlist(Playlist::new("one", vec![0, 4]));

        let quiet = captured_logs(|| {
            config.validate().unwrap();
        });
        assert!(quiet.is_empty());

        config.debug = true;
        let logged = captured_logs(|| {
            config.validate().unwrap();
        });
        assert!(logged.contains("WARN"));
        assert!(logged.contains("Playlist references a song that does not exist"));
        assert!(logged.contains("song_index=4"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            PlayerConfig::from_json("{ songs: "),
            Err(CoreError::Json(_))
        ));
    }
}
