//! Visualization selection
//!
//! The player does not draw anything. It keeps track of which registered
//! visualization should be running for the active song so the binding layer
//! can attach it to the analyser, and tells hosts without Web Audio what to
//! show instead.

use crate::error::{PlaybackError, Result};
use cadence_core::Song;
use serde::Serialize;
use std::collections::BTreeMap;

/// What to show in place of a visualization the host cannot run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum VisualizationFallback {
    /// Hide the visualization area
    Hide,

    /// Show cover art (`None` when neither the song nor the config has any)
    ShowArt(Option<String>),
}

/// Registered visualizations and the one currently running
#[derive(Debug, Clone, Default, Serialize)]
pub struct VisualizationRegistry {
    registered: BTreeMap<String, serde_json::Value>,
    active: Option<String>,
    running: Option<String>,
}

impl VisualizationRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a visualization with its preferences
    ///
    /// Re-registering an id replaces its preferences. The first registered
    /// visualization becomes the active one.
    pub fn register(&mut self, id: impl Into<String>, preferences: serde_json::Value) {
        let id = id.into();
        if self.active.is_none() {
            self.active = Some(id.clone());
        }
        self.registered.insert(id, preferences);
    }

    /// Whether `id` is registered
    pub fn is_registered(&self, id: &str) -> bool {
        self.registered.contains_key(id)
    }

    /// Preferences for a visualization
    pub fn preferences(&self, id: &str) -> Option<&serde_json::Value> {
        self.registered.get(id)
    }

    /// Default visualization
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Visualization currently running
    pub fn running(&self) -> Option<&str> {
        self.running.as_deref()
    }

    /// Change the default visualization
    ///
    /// A running visualization is stopped and the new one started in its
    /// place.
    pub fn set_active(&mut self, id: &str) -> Result<()> {
        if !self.is_registered(id) {
            return Err(PlaybackError::UnknownVisualization(id.to_string()));
        }

        let was_running = self.running.take().is_some();
        self.active = Some(id.to_string());
        if was_running {
            self.running = self.active.clone();
        }
        Ok(())
    }

    /// Visualization to use for `song`
    ///
    /// A registered per-song visualization wins over the default.
    pub fn select_for_song<'a>(&'a self, song: &'a Song) -> Option<&'a str> {
        song.visualization
            .as_deref()
            .filter(|id| self.is_registered(id))
            .or(self.active.as_deref())
    }

    /// Start the visualization for `song`; returns the id that is running
    pub fn start(&mut self, song: &Song) -> Option<&str> {
        self.running = self.select_for_song(song).map(str::to_string);
        self.running.as_deref()
    }

    /// Stop the running visualization
    pub fn stop(&mut self) {
        self.running = None;
    }
}
