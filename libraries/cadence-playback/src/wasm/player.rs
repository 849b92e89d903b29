//! WASM-compatible Player wrapper

use super::element::AudioElement;
use crate::{Capabilities, Command, PlayTarget, Player, PlayerEvent, PlaybackError};
use cadence_core::{PlayerConfig, Song};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlAudioElement;

/// WASM-compatible player
///
/// Wraps `Player` with a JavaScript-friendly API. Every change the player
/// queues is forwarded to the `onEvent` listener as a plain object.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Player<AudioElement>,

    // Event listeners
    on_event: Option<Function>,
    on_error: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player
    ///
    /// `config` is a plain configuration object, `callbacks` maps lifecycle
    /// names (`before_play`, ...) to functions, `capabilities` describes the
    /// host (`{web_audio, reconnect_on_play}`).
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        element: HtmlAudioElement,
        callbacks: Option<Object>,
        capabilities: JsValue,
    ) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let mut config: PlayerConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        config.normalize();

        let capabilities: Capabilities = if capabilities.is_undefined() || capabilities.is_null() {
            Capabilities::default()
        } else {
            serde_wasm_bindgen::from_value(capabilities)
                .map_err(|e| JsValue::from_str(&format!("Invalid capabilities: {}", e)))?
        };

        let mut builder =
            Player::builder(config, AudioElement::new(element)).capabilities(capabilities);

        if let Some(callbacks) = callbacks {
            for key in Object::keys(&callbacks).iter() {
                let Some(name) = key.as_string() else {
                    continue;
                };
                let function: Function = Reflect::get(&callbacks, &key)?
                    .dyn_into()
                    .map_err(|_| JsValue::from_str(&format!("Callback {} is not a function", name)))?;

                builder = builder
                    .callback_named(&name, move |ctx| {
                        function
                            .call1(&JsValue::NULL, &JsValue::from(ctx.active_index as u32))
                            .ok();
                    })
                    .map_err(to_js)?;
            }
        }

        Ok(Self {
            inner: builder.build().map_err(to_js)?,
            on_event: None,
            on_error: None,
        })
    }

    /// Forward a command object (`{action: "next", playlist: "..."}`)
    pub fn dispatch(&mut self, command: JsValue) -> Result<(), JsValue> {
        let command: Command = serde_wasm_bindgen::from_value(command)
            .map_err(|e| JsValue::from_str(&format!("Invalid command: {}", e)))?;

        self.inner.dispatch(command);
        self.flush();
        Ok(())
    }

    // ===== Playback Control =====

    /// Play the active song
    pub fn play(&mut self) -> Result<(), JsValue> {
        let result = self.inner.play();
        self.finish(result)
    }

    /// Pause the active song
    pub fn pause(&mut self) {
        self.inner.pause();
        self.flush();
    }

    /// Stop the active song
    pub fn stop(&mut self) {
        self.inner.stop();
        self.flush();
    }

    /// Toggle play/pause for a song and/or playlist control
    #[wasm_bindgen(js_name = playPause)]
    pub fn play_pause(&mut self, song: Option<usize>, playlist: Option<String>) -> Result<(), JsValue> {
        let result = self.inner.play_pause(&PlayTarget { song, playlist });
        self.finish(result)
    }

    /// Next song
    pub fn next(&mut self, playlist: Option<String>) -> Result<(), JsValue> {
        let result = self.inner.next(playlist.as_deref());
        self.finish(result)
    }

    /// Previous song
    pub fn prev(&mut self, playlist: Option<String>) -> Result<(), JsValue> {
        let result = self.inner.prev(playlist.as_deref());
        self.finish(result)
    }

    /// Play a song object that is not part of the configuration
    #[wasm_bindgen(js_name = playNow)]
    pub fn play_now(&mut self, song: JsValue) -> Result<usize, JsValue> {
        let song: Song = serde_wasm_bindgen::from_value(song)
            .map_err(|e| JsValue::from_str(&format!("Invalid song: {}", e)))?;

        let result = self.inner.play_now(song);
        self.flush();
        result.map_err(|e| self.handle_error(&e))
    }

    /// Append a song object and return its index
    #[wasm_bindgen(js_name = addSong)]
    pub fn add_song(&mut self, song: JsValue) -> Result<usize, JsValue> {
        let song: Song = serde_wasm_bindgen::from_value(song)
            .map_err(|e| JsValue::from_str(&format!("Invalid song: {}", e)))?;
        Ok(self.inner.add_song(song))
    }

    /// Media element `ended` handler
    #[wasm_bindgen(js_name = songEnded)]
    pub fn song_ended(&mut self) -> Result<(), JsValue> {
        let result = self.inner.song_ended();
        self.finish(result)
    }

    /// Media element `timeupdate` handler
    #[wasm_bindgen(js_name = timeUpdate)]
    pub fn time_update(&mut self) -> JsValue {
        let update = self.inner.time_update();
        self.flush();
        serde_wasm_bindgen::to_value(&update).unwrap_or(JsValue::NULL)
    }

    // ===== Volume Control =====

    /// Set volume (0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, percent: u8) {
        self.inner.set_volume_percent(percent);
        self.flush();
    }

    /// Get current volume (0-100)
    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> u8 {
        self.inner.state().volume().percent()
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.inner.toggle_mute();
        self.flush();
    }

    // ===== State Queries =====

    /// Active song as a plain object
    #[wasm_bindgen(js_name = getActiveSong)]
    pub fn get_active_song(&self) -> JsValue {
        self.inner
            .active_song()
            .and_then(|song| serde_wasm_bindgen::to_value(song).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Song by index as a plain object
    #[wasm_bindgen(js_name = getSongAtIndex)]
    pub fn get_song_at_index(&self, index: usize) -> JsValue {
        self.inner
            .song(index)
            .and_then(|song| serde_wasm_bindgen::to_value(song).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Playback state as a plain object
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.state()).unwrap_or(JsValue::NULL)
    }

    /// Analyser node set by the page, if the host supports Web Audio
    pub fn analyser(&self) -> JsValue {
        self.inner.analyser().cloned().unwrap_or(JsValue::NULL)
    }

    /// Hand the player the analyser node built by the page
    #[wasm_bindgen(js_name = setAnalyser)]
    pub fn set_analyser(&mut self, analyser: JsValue) {
        self.inner.media_mut().set_analyser(analyser);
    }

    /// Register a visualization with its preferences object
    #[wasm_bindgen(js_name = registerVisualization)]
    pub fn register_visualization(&mut self, id: String, preferences: JsValue) -> Result<(), JsValue> {
        let preferences: serde_json::Value = serde_wasm_bindgen::from_value(preferences)
            .map_err(|e| JsValue::from_str(&format!("Invalid preferences: {}", e)))?;
        self.inner.register_visualization(id, preferences);
        Ok(())
    }

    /// Make a registered visualization the default
    #[wasm_bindgen(js_name = changeVisualization)]
    pub fn change_visualization(&mut self, id: &str) -> Result<(), JsValue> {
        let result = self.inner.set_visualization(id);
        result.map_err(|e| self.handle_error(&e))
    }

    /// Replacement for visualizations on hosts without Web Audio
    #[wasm_bindgen(js_name = visualizationFallback)]
    pub fn visualization_fallback(&self) -> JsValue {
        self.inner
            .visualization_fallback()
            .and_then(|fallback| serde_wasm_bindgen::to_value(&fallback).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Turn warning output on or off
    #[wasm_bindgen(js_name = setDebug)]
    pub fn set_debug(&mut self, debug: bool) {
        self.inner.set_debug(debug);
    }

    /// Check that a name is a known lifecycle callback
    #[wasm_bindgen(js_name = isCallbackName)]
    pub fn is_callback_name(name: &str) -> bool {
        name.parse::<PlayerEvent>().is_ok()
    }

    // ===== Event Listeners =====

    /// Register the change listener
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    /// Register error callback
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, callback: Function) {
        self.on_error = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn finish(&mut self, result: crate::Result<()>) -> Result<(), JsValue> {
        self.flush();
        result.map_err(|e| self.handle_error(&e))
    }

    fn flush(&mut self) {
        let events = self.inner.drain_events();
        if let Some(ref cb) = self.on_event {
            for event in &events {
                if let Ok(js_event) = serde_wasm_bindgen::to_value(event) {
                    cb.call1(&JsValue::NULL, &js_event).ok();
                }
            }
        }
    }

    fn handle_error(&self, error: &PlaybackError) -> JsValue {
        let err_msg = error.to_string();

        if let Some(ref cb) = self.on_error {
            cb.call1(&JsValue::NULL, &JsValue::from_str(&err_msg)).ok();
        }

        JsValue::from_str(&err_msg)
    }
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
