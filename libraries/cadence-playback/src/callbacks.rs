//! Lifecycle callbacks
//!
//! Handlers are registered per `PlayerEvent` at configuration time and run in
//! registration order.

use crate::error::PlaybackError;
use cadence_core::Song;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Points in the player lifecycle that run user callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerEvent {
    BeforePlay,
    AfterPlay,
    BeforeStop,
    AfterStop,
    BeforeNext,
    AfterNext,
    BeforePrev,
    AfterPrev,
    AfterSongEnded,
    BeforeAlbumChange,
    AfterAlbumChange,
    PlaylistChanged,
    AfterInit,
}

impl PlayerEvent {
    /// Every event, in lifecycle order
    pub const ALL: [PlayerEvent; 13] = [
        PlayerEvent::BeforePlay,
        PlayerEvent::AfterPlay,
        PlayerEvent::BeforeStop,
        PlayerEvent::AfterStop,
        PlayerEvent::BeforeNext,
        PlayerEvent::AfterNext,
        PlayerEvent::BeforePrev,
        PlayerEvent::AfterPrev,
        PlayerEvent::AfterSongEnded,
        PlayerEvent::BeforeAlbumChange,
        PlayerEvent::AfterAlbumChange,
        PlayerEvent::PlaylistChanged,
        PlayerEvent::AfterInit,
    ];

    /// Callback name as used in configuration
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerEvent::BeforePlay => "before_play",
            PlayerEvent::AfterPlay => "after_play",
            PlayerEvent::BeforeStop => "before_stop",
            PlayerEvent::AfterStop => "after_stop",
            PlayerEvent::BeforeNext => "before_next",
            PlayerEvent::AfterNext => "after_next",
            PlayerEvent::BeforePrev => "before_prev",
            PlayerEvent::AfterPrev => "after_prev",
            PlayerEvent::AfterSongEnded => "after_song_ended",
            PlayerEvent::BeforeAlbumChange => "before_album_change",
            PlayerEvent::AfterAlbumChange => "after_album_change",
            PlayerEvent::PlaylistChanged => "playlist_changed",
            PlayerEvent::AfterInit => "after_init",
        }
    }
}

impl FromStr for PlayerEvent {
    type Err = PlaybackError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        PlayerEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == name)
            .ok_or_else(|| PlaybackError::UnknownEvent(name.to_string()))
    }
}

impl fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a callback gets to see
#[derive(Debug, Clone, Copy)]
pub struct CallbackContext<'a> {
    /// Event being run
    pub event: PlayerEvent,

    /// Active song index at the time of the call
    pub active_index: usize,

    /// Active playlist at the time of the call
    pub active_playlist: Option<&'a str>,

    /// Active song at the time of the call
    pub song: Option<&'a Song>,
}

/// Boxed callback
pub type Callback = Box<dyn FnMut(&CallbackContext<'_>)>;

/// Registered callbacks keyed by event
#[derive(Default)]
pub struct CallbackRegistry {
    handlers: HashMap<PlayerEvent, Vec<Callback>>,
}

impl CallbackRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler for `event`
    pub fn register<F>(&mut self, event: PlayerEvent, handler: F)
    where
        F: FnMut(&CallbackContext<'_>) + 'static,
    {
        self.handlers.entry(event).or_default().push(Box::new(handler));
    }

    /// Run every handler for the context's event; returns how many ran
    pub fn run(&mut self, context: &CallbackContext<'_>) -> usize {
        match self.handlers.get_mut(&context.event) {
            Some(handlers) => {
                for handler in handlers.iter_mut() {
                    handler(context);
                }
                handlers.len()
            }
            None => 0,
        }
    }

    /// Whether any handler is registered for `event`
    pub fn is_registered(&self, event: PlayerEvent) -> bool {
        self.handlers
            .get(&event)
            .is_some_and(|handlers| !handlers.is_empty())
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(PlayerEvent, usize)> = self
            .handlers
            .iter()
            .map(|(event, handlers)| (*event, handlers.len()))
            .collect();
        counts.sort_by_key(|(event, _)| event.as_str());

        f.debug_struct("CallbackRegistry")
            .field("handlers", &counts)
            .finish()
    }
}
