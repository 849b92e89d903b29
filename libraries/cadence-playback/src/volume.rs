//! Volume control with reversible mute
//!
//! Volume is kept as a 0.0-1.0 level, the unit the media element expects.
//! Controls speak percent (0-100). Muting remembers the level it replaced so
//! unmuting restores it exactly.

use serde::Serialize;

/// Volume controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Level to restore on unmute
    pre_mute_level: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0.0-1.0, default: 0.5)
    pub fn new(level: f32) -> Self {
        let level = Self::clamp(level);
        Self {
            level,
            pre_mute_level: level,
        }
    }

    /// Set volume level (0.0-1.0)
    pub fn set_level(&mut self, level: f32) {
        self.level = Self::clamp(level);
    }

    /// Set volume from a percentage (0-100)
    pub fn set_percent(&mut self, percent: u8) {
        self.set_level(f32::from(percent.min(100)) / 100.0);
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Get current volume as a rounded percentage (0-100)
    pub fn percent(&self) -> u8 {
        (self.level * 100.0).round() as u8
    }

    /// Level that unmuting would restore
    pub fn pre_mute_level(&self) -> f32 {
        self.pre_mute_level
    }

    /// Muted means a level of exactly zero
    pub fn is_muted(&self) -> bool {
        self.level == 0.0
    }

    /// Remember the current level and drop to zero
    pub fn mute(&mut self) {
        if !self.is_muted() {
            self.pre_mute_level = self.level;
            self.level = 0.0;
        }
    }

    /// Restore the level from before muting
    pub fn unmute(&mut self) {
        if self.is_muted() {
            self.level = self.pre_mute_level;
        }
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        if self.is_muted() {
            self.unmute();
        } else {
            self.mute();
        }
    }

    /// Raise the level by `step` percent, capped at 1.0
    pub fn increase(&mut self, step: u8) {
        self.set_level(self.level + f32::from(step) / 100.0);
    }

    /// Lower the level by `step` percent, floored at 0.0
    pub fn decrease(&mut self, step: u8) {
        self.set_level(self.level - f32::from(step) / 100.0);
    }

    fn clamp(level: f32) -> f32 {
        if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.5)
    }
}
