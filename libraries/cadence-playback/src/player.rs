//! Player controller - core orchestration
//!
//! Owns the songs, the playback state, the transport, callbacks and
//! visualizations of one player instance. Binding layers either call the
//! typed methods (which return errors) or forward user interactions through
//! `dispatch` (which never does), then drain the queued `PlaybackEvent`s to
//! redraw.

use crate::{
    callbacks::{CallbackContext, CallbackRegistry, PlayerEvent},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    library::Library,
    media::MediaElement,
    resolver::{resolve_next, resolve_playlist_start, resolve_prev, resolve_song},
    shuffle::ShuffleEngine,
    state::PlaybackState,
    time::{format_time, TimeUpdate},
    transport::Transport,
    types::{Capabilities, Command, PlayTarget, PlaybackSpeed, SongChange, TransportStatus},
    visualization::{VisualizationFallback, VisualizationRegistry},
    volume::Volume,
};
use cadence_core::{CoreError, PlayerConfig, Playlist, Song, VisualizationBackup};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Settings taken from the configuration that are not playback state
#[derive(Debug, Clone)]
struct Settings {
    volume_increment: u8,
    volume_decrement: u8,
    default_album_art: Option<String>,
    visualization_backup: VisualizationBackup,
    debug: bool,
}

impl From<&PlayerConfig> for Settings {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            volume_increment: config.volume_increment,
            volume_decrement: config.volume_decrement,
            default_album_art: config.default_album_art.clone(),
            visualization_backup: config.visualization_backup,
            debug: config.debug,
        }
    }
}

/// Builder for `Player`
///
/// Callbacks and visualizations are registered here, before the player
/// initializes, so `after_init` handlers see the first song.
pub struct PlayerBuilder<M: MediaElement> {
    config: PlayerConfig,
    media: M,
    capabilities: Capabilities,
    callbacks: CallbackRegistry,
    visualizations: VisualizationRegistry,
    shuffle_seed: Option<u64>,
}

impl<M: MediaElement> PlayerBuilder<M> {
    /// Capabilities of the host (default: none)
    #[must_use]
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Register a callback
    #[must_use]
    pub fn callback<F>(mut self, event: PlayerEvent, handler: F) -> Self
    where
        F: FnMut(&CallbackContext<'_>) + 'static,
    {
        self.callbacks.register(event, handler);
        self
    }

    /// Register a callback by its configuration name (`before_play`, ...)
    pub fn callback_named<F>(mut self, name: &str, handler: F) -> Result<Self>
    where
        F: FnMut(&CallbackContext<'_>) + 'static,
    {
        let event = name.parse::<PlayerEvent>()?;
        self.callbacks.register(event, handler);
        Ok(self)
    }

    /// Register a visualization
    #[must_use]
    pub fn visualization(mut self, id: impl Into<String>, preferences: serde_json::Value) -> Self {
        self.visualizations.register(id, preferences);
        self
    }

    /// Fixed shuffle seed (reproducible shuffle orders)
    #[must_use]
    pub fn shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Validate the configuration and initialize the player
    ///
    /// Fails with `MissingSongs` when the configuration has no songs.
    pub fn build(self) -> Result<Player<M>> {
        let shuffle = match self.shuffle_seed {
            Some(seed) => ShuffleEngine::seeded(seed),
            None => ShuffleEngine::new(),
        };

        let mut player = Player {
            library: Library::default(),
            state: PlaybackState::default(),
            transport: Transport::new(self.media, self.capabilities.reconnect_on_play),
            shuffle,
            callbacks: self.callbacks,
            visualizations: self.visualizations,
            capabilities: self.capabilities,
            settings: Settings::from(&self.config),
            pending_events: Vec::new(),
        };

        player.configure(&self.config)?;
        Ok(player)
    }
}

/// Audio player controller
#[derive(Debug)]
pub struct Player<M: MediaElement> {
    library: Library,
    state: PlaybackState,
    transport: Transport<M>,
    shuffle: ShuffleEngine,
    callbacks: CallbackRegistry,
    visualizations: VisualizationRegistry,
    capabilities: Capabilities,
    settings: Settings,

    // Event queue for visual synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<M: MediaElement> Player<M> {
    /// Start building a player for `config` driving `media`
    pub fn builder(config: PlayerConfig, media: M) -> PlayerBuilder<M> {
        PlayerBuilder {
            config,
            media,
            capabilities: Capabilities::default(),
            callbacks: CallbackRegistry::new(),
            visualizations: VisualizationRegistry::new(),
            shuffle_seed: None,
        }
    }

    /// Player with default capabilities and no callbacks
    pub fn new(config: PlayerConfig, media: M) -> Result<Self> {
        Self::builder(config, media).build()
    }

    /// Reset the player with a new configuration
    ///
    /// Callbacks, visualizations and capabilities are kept. On error the
    /// previous configuration stays in effect.
    pub fn reinit(&mut self, config: &PlayerConfig) -> Result<()> {
        self.configure(config)
    }

    fn configure(&mut self, config: &PlayerConfig) -> Result<()> {
        match config.validate() {
            Ok(_) => {}
            Err(CoreError::MissingSongs) => {
                if config.debug {
                    warn!("No songs configured, player not initialized");
                }
                return Err(PlaybackError::MissingSongs);
            }
            Err(e) => return Err(e.into()),
        }

        if let Some(song) = self.library.song(self.state.active_index) {
            self.transport.stop(song);
        }
        self.visualizations.stop();

        let playback_speed = PlaybackSpeed::try_from(config.playback_speed).unwrap_or_else(|e| {
            if config.debug {
                warn!(error = %e, "Falling back to normal playback speed");
            }
            PlaybackSpeed::Normal
        });

        let start = match config.start_song {
            Some(index) if index < config.songs.len() => index,
            Some(index) => {
                if config.debug {
                    warn!(start_song = index, "Start song out of range, starting at 0");
                }
                0
            }
            None => 0,
        };

        self.settings = Settings::from(config);
        self.library = Library::from_config(config);
        self.state = PlaybackState {
            active_index: start,
            active_album: config.songs.get(start).and_then(|song| song.album.clone()),
            repeat: config.repeat,
            playback_speed,
            volume: Volume::new(config.volume),
            ..PlaybackState::default()
        };

        if config.shuffle {
            self.shuffle.enable_global(&mut self.state, &self.library);
        }

        self.transport.apply_volume(&self.state.volume);
        self.transport.set_speed(playback_speed);
        if let Some(song) = self.library.song(start) {
            if song.has_url() {
                self.transport.load(song);
            }
        }

        debug!(
            songs = self.library.len(),
            playlists = self.library.playlists().len(),
            start_song = start,
            shuffle = config.shuffle,
            "Player initialized"
        );

        self.run_callbacks(PlayerEvent::AfterInit);
        Ok(())
    }

    // ===== Playback Control =====

    /// Play the active song
    pub fn play(&mut self) -> Result<()> {
        let index = self.state.active_index;
        let song = self.library.require_song(index)?;

        if !song.is_playable() {
            return Err(if song.has_url() {
                PlaybackError::NotStreamable(song.url.clone())
            } else {
                PlaybackError::MissingUrl(song.name.clone())
            });
        }

        self.run_callbacks(PlayerEvent::BeforePlay);

        if let Some(song) = self.library.song(index) {
            self.transport.play(song, self.state.playback_speed);
            if self.capabilities.web_audio {
                self.visualizations.start(song);
            }
        }

        trace!(index, "Playing");
        self.emit_status();
        self.run_callbacks(PlayerEvent::AfterPlay);
        Ok(())
    }

    /// Pause the active song
    pub fn pause(&mut self) {
        if let Some(song) = self.library.song(self.state.active_index) {
            self.transport.pause(song);
        }
        self.emit_status();
    }

    /// Stop and rewind the active song
    pub fn stop(&mut self) {
        self.run_callbacks(PlayerEvent::BeforeStop);
        self.halt();
        self.run_callbacks(PlayerEvent::AfterStop);
    }

    /// Play whatever a control is bound to
    ///
    /// Switches song (and playlist) first when the target is not the active
    /// song.
    pub fn play_target(&mut self, target: &PlayTarget) -> Result<()> {
        if !self.is_active_target(target) {
            let change = match (target.song, target.playlist.as_deref()) {
                (Some(index), playlist) => {
                    resolve_song(&self.state, &self.library, index, playlist)?
                }
                (None, Some(playlist)) => {
                    resolve_playlist_start(&self.state, &self.library, playlist)?
                }
                (None, None) => return self.play(),
            };
            self.apply_change(&change)?;
        }

        self.play()
    }

    /// Toggle play/pause for a control
    ///
    /// A control bound to the active song (or the active playlist) toggles;
    /// any other control switches to its song and plays.
    pub fn play_pause(&mut self, target: &PlayTarget) -> Result<()> {
        if self.is_active_target(target) {
            if self.transport.is_playing() {
                self.pause();
                Ok(())
            } else {
                self.play()
            }
        } else {
            self.play_target(target)
        }
    }

    /// Switch to a song and play it
    pub fn play_song(&mut self, index: usize, playlist: Option<&str>) -> Result<()> {
        self.play_target(&PlayTarget {
            song: Some(index),
            playlist: playlist.map(str::to_string),
        })
    }

    /// Play the next song, inside `playlist` when given
    pub fn next(&mut self, playlist: Option<&str>) -> Result<()> {
        self.run_callbacks(PlayerEvent::BeforeNext);

        let change = resolve_next(&self.state, &self.library, playlist)?;
        self.apply_change(&change)?;
        self.play()?;

        self.run_callbacks(PlayerEvent::AfterNext);
        Ok(())
    }

    /// Play the previous song, inside `playlist` when given
    pub fn prev(&mut self, playlist: Option<&str>) -> Result<()> {
        self.run_callbacks(PlayerEvent::BeforePrev);

        let change = resolve_prev(&self.state, &self.library, playlist)?;
        self.apply_change(&change)?;
        self.play()?;

        self.run_callbacks(PlayerEvent::AfterPrev);
        Ok(())
    }

    /// Handle the media element's `ended` event
    ///
    /// Repeat replays the song. Otherwise the next song of the active
    /// playlist (or the collection) plays; a lone song just stops.
    pub fn song_ended(&mut self) -> Result<()> {
        self.transport.mark_ended();

        if self.state.repeat {
            self.halt();
            self.play()?;
        } else if self.library.len() > 1 {
            let playlist = self.state.active_playlist.clone();
            let change = resolve_next(&self.state, &self.library, playlist.as_deref())?;
            self.halt();
            self.apply_change(&change)?;
            self.play()?;
        } else {
            self.halt();
        }

        self.run_callbacks(PlayerEvent::AfterSongEnded);
        Ok(())
    }

    /// Jump to a song and a position in it, then play
    pub fn skip_to(&mut self, index: usize, seconds: f64, playlist: Option<&str>) -> Result<()> {
        let change = resolve_song(&self.state, &self.library, index, playlist)?;
        self.apply_change(&change)?;
        self.play()?;

        if let Some(song) = self.library.song(index) {
            self.transport.seek_seconds(song, seconds);
        }
        Ok(())
    }

    /// Play a song that is not part of the configuration
    ///
    /// The song is appended to the collection so it can be addressed like
    /// any other. A song without a URL is rejected before the transport is
    /// touched.
    pub fn play_now(&mut self, song: Song) -> Result<usize> {
        if !song.has_url() {
            if self.settings.debug {
                warn!(name = %song.name, "The song needs to have a URL");
            }
            return Err(PlaybackError::MissingUrl(song.name));
        }

        let index = self.add_song(song);
        let change = resolve_song(&self.state, &self.library, index, None)?;
        self.apply_change(&change)?;
        self.play()?;
        Ok(index)
    }

    /// Append a song to the collection and return its index
    pub fn add_song(&mut self, song: Song) -> usize {
        let index = self.library.push(song);
        if self.state.shuffle_on {
            self.state.shuffle_order.push(index);
        }
        debug!(index, "Song added");
        index
    }

    // ===== Seeking =====

    /// Move within the active song (0-100)
    pub fn seek(&mut self, percent: f64) {
        if let Some(song) = self.library.song(self.state.active_index) {
            self.transport.seek(song, percent);
        }
    }

    /// Move within a song from a song-bound slider
    ///
    /// Only has an effect while that song is the one playing.
    pub fn seek_song(&mut self, index: usize, percent: f64) {
        if index == self.state.active_index && self.transport.is_playing() {
            self.seek(percent);
        }
    }

    /// Handle the media element's `timeupdate` event
    ///
    /// Live streams report no completion percentage.
    pub fn time_update(&mut self) -> TimeUpdate {
        let (current, duration) = self.transport.position();
        let live = self
            .library
            .song(self.state.active_index)
            .is_some_and(|song| song.live);

        let update = TimeUpdate {
            current: format_time(current),
            duration: format_time(duration),
            percentage: (!live).then(|| self.transport.completion()),
        };

        self.emit(PlaybackEvent::TimeUpdated(update.clone()));
        update
    }

    // ===== Modes =====

    /// Toggle shuffle globally (`None`) or for one playlist
    ///
    /// Returns the shuffle state afterwards.
    pub fn toggle_shuffle(&mut self, playlist: Option<&str>) -> Result<bool> {
        match playlist {
            Some(id) => self.toggle_playlist_shuffle(id),
            None => {
                let enabled = self.shuffle.toggle_global(&mut self.state, &self.library);
                debug!(enabled, "Global shuffle toggled");
                self.emit(PlaybackEvent::ShuffleChanged {
                    playlist: None,
                    enabled,
                });
                Ok(enabled)
            }
        }
    }

    /// Toggle shuffle for one playlist
    pub fn toggle_playlist_shuffle(&mut self, id: &str) -> Result<bool> {
        let playlist = self.library.playlist(id)?;
        let enabled = self
            .shuffle
            .toggle_playlist(&mut self.state, playlist, self.library.len());

        debug!(playlist = id, enabled, "Playlist shuffle toggled");
        self.emit(PlaybackEvent::ShuffleChanged {
            playlist: Some(id.to_string()),
            enabled,
        });
        Ok(enabled)
    }

    /// Toggle repeat; returns the new state
    pub fn toggle_repeat(&mut self) -> bool {
        self.state.repeat = !self.state.repeat;
        self.emit(PlaybackEvent::RepeatChanged {
            enabled: self.state.repeat,
        });
        self.state.repeat
    }

    /// Advance playback speed 1.0 → 1.5 → 2.0 → 1.0
    pub fn cycle_playback_speed(&mut self) -> PlaybackSpeed {
        let speed = self.state.playback_speed.next();
        self.set_playback_speed(speed);
        speed
    }

    /// Set the playback speed
    pub fn set_playback_speed(&mut self, speed: PlaybackSpeed) {
        self.state.playback_speed = speed;
        self.transport.set_speed(speed);
        self.emit(PlaybackEvent::SpeedChanged { speed });
    }

    // ===== Volume Control =====

    /// Set volume (0-100)
    pub fn set_volume_percent(&mut self, percent: u8) {
        self.state.volume.set_percent(percent);
        self.sync_volume();
    }

    /// Raise volume by the configured increment
    pub fn volume_up(&mut self) {
        self.state.volume.increase(self.settings.volume_increment);
        self.sync_volume();
    }

    /// Lower volume by the configured decrement
    pub fn volume_down(&mut self) {
        self.state.volume.decrease(self.settings.volume_decrement);
        self.sync_volume();
    }

    /// Mute, or restore the level from before muting
    pub fn toggle_mute(&mut self) {
        self.state.volume.toggle_mute();
        self.sync_volume();
    }

    // ===== Commands =====

    /// Fire-and-forget entry point for binding layers
    ///
    /// Failures are logged when debug is on and queued as
    /// `PlaybackEvent::Error`; they never reach the caller.
    pub fn dispatch(&mut self, command: Command) {
        trace!(?command, "Dispatching command");

        let result = match command {
            Command::Play(target) => self.play_target(&target),
            Command::Pause => {
                self.pause();
                Ok(())
            }
            Command::PlayPause(target) => self.play_pause(&target),
            Command::Stop => {
                self.stop();
                Ok(())
            }
            Command::Next { playlist } => self.next(playlist.as_deref()),
            Command::Prev { playlist } => self.prev(playlist.as_deref()),
            Command::ToggleShuffle { playlist } => {
                self.toggle_shuffle(playlist.as_deref()).map(|_| ())
            }
            Command::ToggleRepeat => {
                self.toggle_repeat();
                Ok(())
            }
            Command::CyclePlaybackSpeed => {
                self.cycle_playback_speed();
                Ok(())
            }
            Command::SetVolume { percent } => {
                self.set_volume_percent(percent);
                Ok(())
            }
            Command::VolumeUp => {
                self.volume_up();
                Ok(())
            }
            Command::VolumeDown => {
                self.volume_down();
                Ok(())
            }
            Command::ToggleMute => {
                self.toggle_mute();
                Ok(())
            }
            Command::Seek { percent, song } => {
                match song {
                    Some(index) => self.seek_song(index, percent),
                    None => self.seek(percent),
                }
                Ok(())
            }
            Command::SkipTo {
                song,
                seconds,
                playlist,
            } => self.skip_to(song, seconds, playlist.as_deref()),
            Command::SongEnded => self.song_ended(),
            Command::TimeUpdate => {
                self.time_update();
                Ok(())
            }
        };

        if let Err(e) = result {
            self.report(&e);
        }
    }

    /// Take every queued event
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Turn warning output on or off
    pub fn set_debug(&mut self, debug: bool) {
        self.settings.debug = debug;
    }

    /// Whether warning output is on
    pub fn is_debug(&self) -> bool {
        self.settings.debug
    }

    // ===== Visualizations =====

    /// Register a visualization
    pub fn register_visualization(&mut self, id: impl Into<String>, preferences: serde_json::Value) {
        self.visualizations.register(id, preferences);
    }

    /// Change the default visualization
    pub fn set_visualization(&mut self, id: &str) -> Result<()> {
        self.visualizations.set_active(id)
    }

    /// Visualization registry
    pub fn visualizations(&self) -> &VisualizationRegistry {
        &self.visualizations
    }

    /// What to show instead of a visualization
    ///
    /// `None` when the host can run visualizations.
    pub fn visualization_fallback(&self) -> Option<VisualizationFallback> {
        if self.capabilities.web_audio {
            return None;
        }

        Some(match self.settings.visualization_backup {
            VisualizationBackup::Nothing => VisualizationFallback::Hide,
            VisualizationBackup::AlbumArt => {
                VisualizationFallback::ShowArt(self.active_cover_art().map(str::to_string))
            }
        })
    }

    // ===== Queries =====

    /// Active song
    pub fn active_song(&self) -> Option<&Song> {
        self.library.song(self.state.active_index)
    }

    /// Song by index
    pub fn song(&self, index: usize) -> Option<&Song> {
        self.library.song(index)
    }

    /// All songs
    pub fn songs(&self) -> &[Song] {
        self.library.songs()
    }

    /// All playlists keyed by id
    pub fn playlists(&self) -> &BTreeMap<String, Playlist> {
        self.library.playlists()
    }

    /// Playback state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Transport status
    pub fn status(&self) -> TransportStatus {
        self.transport.status()
    }

    /// Host capabilities
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Cover art for the active song, falling back to the configured default
    pub fn active_cover_art(&self) -> Option<&str> {
        self.active_song()
            .and_then(|song| song.cover_art_url.as_deref())
            .or(self.settings.default_album_art.as_deref())
    }

    /// Analyser node for visualizations
    pub fn analyser(&self) -> Option<&M::Analyser> {
        if self.capabilities.web_audio {
            self.transport.media().analyser()
        } else {
            None
        }
    }

    /// The media element
    pub fn media(&self) -> &M {
        self.transport.media()
    }

    /// Mutable access to the media element
    pub fn media_mut(&mut self) -> &mut M {
        self.transport.media_mut()
    }

    // ===== Internals =====

    fn is_active_target(&self, target: &PlayTarget) -> bool {
        let active_playlist = self.state.active_playlist.as_deref();
        match (target.song, target.playlist.as_deref()) {
            (None, None) => true,
            (Some(index), None) => index == self.state.active_index,
            (Some(index), Some(playlist)) => {
                index == self.state.active_index && Some(playlist) == active_playlist
            }
            (None, Some(playlist)) => Some(playlist) == active_playlist,
        }
    }

    /// Make a resolved song active
    ///
    /// Album callbacks wrap the switch; the new song is loaded but not
    /// played.
    fn apply_change(&mut self, change: &SongChange) -> Result<()> {
        let new_album = self.library.require_song(change.index)?.album.clone();
        let album_changed = new_album != self.state.active_album;
        let previous_index = self.state.active_index;
        let previous_playlist = self.state.active_playlist.clone();

        if album_changed {
            self.run_callbacks(PlayerEvent::BeforeAlbumChange);
        }

        if change.song_changed {
            self.halt();
            self.state.set_active(change.index, change.playlist.clone());

            if let Some(song) = self.library.song(change.index) {
                self.transport.load(song);
            }

            debug!(
                index = change.index,
                previous_index,
                playlist = ?change.playlist,
                "Song changed"
            );
            self.emit(PlaybackEvent::SongChanged {
                index: change.index,
                previous_index,
                playlist: change.playlist.clone(),
            });
        }

        self.state.active_album = new_album;

        if album_changed {
            self.run_callbacks(PlayerEvent::AfterAlbumChange);
        }

        if change.playlist_changed {
            self.emit(PlaybackEvent::PlaylistChanged {
                playlist: change.playlist.clone(),
                previous: previous_playlist,
            });
            self.run_callbacks(PlayerEvent::PlaylistChanged);
        }

        Ok(())
    }

    /// Stop without running stop callbacks
    fn halt(&mut self) {
        if let Some(song) = self.library.song(self.state.active_index) {
            self.transport.stop(song);
        }
        self.visualizations.stop();
        self.emit_status();
    }

    fn sync_volume(&mut self) {
        self.transport.apply_volume(&self.state.volume);
        self.emit(PlaybackEvent::VolumeChanged {
            level: self.state.volume.percent(),
            muted: self.state.volume.is_muted(),
        });
    }

    fn run_callbacks(&mut self, event: PlayerEvent) {
        let context = CallbackContext {
            event,
            active_index: self.state.active_index,
            active_playlist: self.state.active_playlist.as_deref(),
            song: self.library.song(self.state.active_index),
        };

        let ran = self.callbacks.run(&context);
        if ran > 0 {
            trace!(%event, handlers = ran, "Ran callbacks");
        }
    }

    fn report(&mut self, error: &PlaybackError) {
        if self.settings.debug {
            warn!(error = %error, "Player operation failed");
        }
        self.emit(PlaybackEvent::Error {
            message: error.to_string(),
        });
    }

    fn emit_status(&mut self) {
        self.emit(PlaybackEvent::StateChanged {
            status: self.transport.status(),
        });
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}
