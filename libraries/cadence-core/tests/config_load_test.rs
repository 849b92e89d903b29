//! Loading player configuration from files
//!
//! Writes real config files to a temp dir and loads them through the layered
//! loader, the same way the CLI does.

use cadence_core::{CoreError, PlayerConfig, VisualizationBackup};
use std::io::Write;

fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn load_toml_file() {
    let file = write_config(
        ".toml",
        r#"
debug = true
volume = 0.25
repeat = true
visualization_backup = "album-art"

[[songs]]
url = "https://cdn.example.com/first.mp3"
name = "First"
artist = "Band"
album = "Debut"

[[songs]]
url = "https://radio.example.com/live"
name = "Radio"
artist = "Station"
live = true

[playlists.road]
songs = [1, 0]
"#,
    );

    let config = PlayerConfig::load(Some(file.path())).unwrap();

    assert!(config.debug);
    assert!(config.repeat);
    assert_eq!(config.volume, 0.25);
    assert_eq!(config.volume_increment, 5);
    assert_eq!(config.visualization_backup, VisualizationBackup::AlbumArt);
    assert_eq!(config.songs.len(), 2);
    assert!(config.songs[1].live);
    assert_eq!(config.songs[0].album.as_deref(), Some("Debut"));
    assert_eq!(config.playlists["road"].id, "road");
    assert_eq!(config.playlists["road"].songs, vec![1, 0]);
}

#[test]
fn load_json_file() {
    let file = write_config(
        ".json",
        r#"{
            "songs": [{"url": "a.mp3", "name": "A", "artist": "X"}],
            "playback_speed": 1.5,
            "soundcloud": {"client_id": "abc123", "use_art": true}
        }"#,
    );

    let config = PlayerConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.playback_speed, 1.5);
    let soundcloud = config.soundcloud.expect("soundcloud settings");
    assert_eq!(soundcloud.client_id, "abc123");
    assert!(soundcloud.use_art);
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");

    match PlayerConfig::load(Some(&path)) {
        Err(CoreError::Config(message)) => assert!(message.contains("not found")),
        other => panic!("Expected config error, got {:?}", other),
    }
}

#[test]
fn loaded_config_without_songs_fails_validation() {
    let file = write_config(".toml", "debug = false\n");

    let config = PlayerConfig::load(Some(file.path())).unwrap();
    assert!(matches!(config.validate(), Err(CoreError::MissingSongs)));
}
