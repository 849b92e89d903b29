//! Song selection for next / previous / playlist navigation
//!
//! Resolution is pure: it reads the library and the playback state and
//! returns a `SongChange` for the player to apply.
//!
//! Rules:
//! - Without a playlist, step through the whole collection, using the global
//!   shuffle order when shuffle is on.
//! - With a playlist, step through that playlist's order (its shuffle order
//!   when shuffled). If the active song is not in it, start at its first song.
//! - Both directions wrap around.

use crate::error::{PlaybackError, Result};
use crate::library::Library;
use crate::state::PlaybackState;
use crate::types::SongChange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn step(self, position: usize, len: usize) -> usize {
        match self {
            Direction::Forward => (position + 1) % len,
            Direction::Backward => (position + len - 1) % len,
        }
    }
}

/// Resolve the song after the active one
pub fn resolve_next(
    state: &PlaybackState,
    library: &Library,
    playlist: Option<&str>,
) -> Result<SongChange> {
    step(state, library, playlist, Direction::Forward)
}

/// Resolve the song before the active one
pub fn resolve_prev(
    state: &PlaybackState,
    library: &Library,
    playlist: Option<&str>,
) -> Result<SongChange> {
    step(state, library, playlist, Direction::Backward)
}

/// Resolve the first song of a playlist in its current order
pub fn resolve_playlist_start(
    state: &PlaybackState,
    library: &Library,
    playlist: &str,
) -> Result<SongChange> {
    let order = library.playlist_order(playlist, state)?;
    let first = *order.first().ok_or(PlaybackError::EmptyCollection)?;
    Ok(change_to(state, first, Some(playlist)))
}

/// Resolve an explicitly chosen song, optionally inside a playlist
pub fn resolve_song(
    state: &PlaybackState,
    library: &Library,
    index: usize,
    playlist: Option<&str>,
) -> Result<SongChange> {
    library.require_song(index)?;
    if let Some(id) = playlist {
        library.playlist(id)?;
    }
    Ok(change_to(state, index, playlist))
}

fn step(
    state: &PlaybackState,
    library: &Library,
    playlist: Option<&str>,
    direction: Direction,
) -> Result<SongChange> {
    if library.is_empty() {
        return Err(PlaybackError::EmptyCollection);
    }

    let order = match playlist {
        Some(id) => library.playlist_order(id, state)?,
        None => library.global_order(state),
    };

    if order.is_empty() {
        return Err(PlaybackError::EmptyCollection);
    }

    let index = match order.iter().position(|&i| i == state.active_index) {
        Some(position) => order[direction.step(position, order.len())],
        None => order[0],
    };

    Ok(change_to(state, index, playlist))
}

fn change_to(state: &PlaybackState, index: usize, playlist: Option<&str>) -> SongChange {
    let playlist_changed = state.active_playlist.as_deref() != playlist;

    SongChange {
        index,
        playlist: playlist.map(str::to_string),
        song_changed: playlist_changed || index != state.active_index,
        playlist_changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{PlayerConfig, Playlist, Song};

    fn library(count: usize, playlists: Vec<Playlist>) -> Library {
        let mut config = PlayerConfig::default();
        for i in 0..count {
            config
                .songs
                .push(Song::new(format!("/music/{}.mp3", i), format!("Song {}", i), "Artist"));
        }
        for playlist in playlists {
            config.add_playlist(playlist);
        }
        Library::from_config(&config)
    }

    fn at(index: usize, playlist: Option<&str>) -> PlaybackState {
        let mut state = PlaybackState::default();
        state.set_active(index, playlist.map(str::to_string));
        state
    }

    #[test]
    fn next_and_prev_over_collection() {
        let library = library(5, vec![]);

        let change = resolve_next(&at(2, None), &library, None).unwrap();
        assert_eq!(change.index, 3);
        assert!(change.song_changed);
        assert!(!change.playlist_changed);

        let change = resolve_prev(&at(2, None), &library, None).unwrap();
        assert_eq!(change.index, 1);
    }

    #[test]
    fn collection_wraps_at_both_ends() {
        let library = library(3, vec![]);

        assert_eq!(resolve_next(&at(2, None), &library, None).unwrap().index, 0);
        assert_eq!(resolve_prev(&at(0, None), &library, None).unwrap().index, 2);
    }

    #[test]
    fn next_then_prev_returns_to_start() {
        let library = library(4, vec![]);

        for start in 0..4 {
            let next = resolve_next(&at(start, None), &library, None).unwrap();
            let back = resolve_prev(&at(next.index, None), &library, None).unwrap();
            assert_eq!(back.index, start);
        }
    }

    #[test]
    fn single_song_is_not_a_change() {
        let library = library(1, vec![]);
        let change = resolve_next(&at(0, None), &library, None).unwrap();
        assert_eq!(change.index, 0);
        assert!(!change.song_changed);
    }

    #[test]
    fn global_shuffle_follows_shuffle_order() {
        let library = library(4, vec![]);
        let mut state = PlaybackState {
            shuffle_on: true,
            shuffle_order: vec![2, 0, 3, 1],
            ..Default::default()
        };
        state.set_active(0, None);

        assert_eq!(resolve_next(&state, &library, None).unwrap().index, 3);
        assert_eq!(resolve_prev(&state, &library, None).unwrap().index, 2);

        state.set_active(1, None);
        assert_eq!(resolve_next(&state, &library, None).unwrap().index, 2);
    }

    #[test]
    fn playlist_navigation_wraps() {
        let library = library(6, vec![Playlist::new("trio", vec![4, 1, 5])]);

        let change = resolve_next(&at(5, Some("trio")), &library, Some("trio")).unwrap();
        assert_eq!(change.index, 4);
        assert!(!change.playlist_changed);

        let change = resolve_prev(&at(4, Some("trio")), &library, Some("trio")).unwrap();
        assert_eq!(change.index, 5);
    }

    #[test]
    fn playlist_without_active_song_starts_at_first() {
        let library = library(6, vec![Playlist::new("trio", vec![4, 1, 5])]);

        let change = resolve_next(&at(0, None), &library, Some("trio")).unwrap();
        assert_eq!(change.index, 4);
        assert_eq!(change.playlist.as_deref(), Some("trio"));
        assert!(change.playlist_changed);
        assert!(change.song_changed);
    }

    #[test]
    fn switching_playlist_counts_as_song_change() {
        let library = library(
            4,
            vec![Playlist::new("a", vec![0, 1]), Playlist::new("b", vec![2, 0])],
        );

        // Song 0 is in both playlists; moving from "a" to "b" lands on index 2
        // but even a same-index landing would be a change
        let change = resolve_playlist_start(&at(2, Some("a")), &library, "b").unwrap();
        assert_eq!(change.index, 2);
        assert!(change.playlist_changed);
        assert!(change.song_changed);
    }

    #[test]
    fn shuffled_playlist_uses_its_own_order() {
        let library = library(6, vec![Playlist::new("trio", vec![4, 1, 5])]);
        let mut state = at(1, Some("trio"));
        state
            .playlist_shuffles
            .insert("trio".to_string(), vec![5, 1, 4]);

        assert_eq!(resolve_next(&state, &library, Some("trio")).unwrap().index, 4);
        assert_eq!(resolve_prev(&state, &library, Some("trio")).unwrap().index, 5);
        assert_eq!(
            resolve_playlist_start(&state, &library, "trio").unwrap().index,
            5
        );
    }

    #[test]
    fn invalid_playlist_entries_are_skipped() {
        let library = library(3, vec![Playlist::new("broken", vec![0, 9, 2])]);

        let change = resolve_next(&at(0, Some("broken")), &library, Some("broken")).unwrap();
        assert_eq!(change.index, 2);
    }

    #[test]
    fn empty_collection_is_an_error() {
        let library = library(0, vec![]);
        assert!(matches!(
            resolve_next(&PlaybackState::default(), &library, None),
            Err(PlaybackError::EmptyCollection)
        ));
    }

    #[test]
    fn empty_playlist_is_an_error() {
        let library = library(3, vec![Playlist::new("none", vec![]), Playlist::new("bad", vec![7])]);

        assert!(matches!(
            resolve_prev(&at(0, None), &library, Some("none")),
            Err(PlaybackError::EmptyCollection)
        ));
        assert!(matches!(
            resolve_next(&at(0, None), &library, Some("bad")),
            Err(PlaybackError::EmptyCollection)
        ));
        assert!(matches!(
            resolve_playlist_start(&at(0, None), &library, "none"),
            Err(PlaybackError::EmptyCollection)
        ));
    }

    #[test]
    fn unknown_playlist_is_an_error() {
        let library = library(3, vec![]);
        assert!(matches!(
            resolve_next(&at(0, None), &library, Some("ghost")),
            Err(PlaybackError::UnknownPlaylist(id)) if id == "ghost"
        ));
    }

    #[test]
    fn resolve_song_validates_index() {
        let library = library(3, vec![]);

        let change = resolve_song(&at(0, None), &library, 2, None).unwrap();
        assert_eq!(change.index, 2);
        assert!(change.song_changed);

        let same = resolve_song(&at(2, None), &library, 2, None).unwrap();
        assert!(!same.song_changed);

        assert!(matches!(
            resolve_song(&at(0, None), &library, 3, None),
            Err(PlaybackError::SongOutOfRange(3))
        ));
    }
}
