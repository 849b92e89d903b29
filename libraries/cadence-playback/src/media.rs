//! Platform-agnostic media element trait
//!
//! Abstracts the single audio element a player drives (an `HTMLAudioElement`
//! in the browser, an in-memory element in tests and headless tools).

/// The audio element a player controls
///
/// Implementors only carry out requests; all decisions about what to load,
/// when to reconnect live streams and what volume to apply are made by
/// `Transport` and `Player`.
pub trait MediaElement {
    /// Audio analysis node exposed to visualizations
    type Analyser;

    /// Point the element at a new source URL
    fn set_source(&mut self, url: &str);

    /// Detach the current source (live stream disconnect)
    fn clear_source(&mut self);

    /// Current source URL, empty when detached
    fn source(&self) -> &str;

    /// Reload the current source
    fn load(&mut self);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Whether the element is paused
    fn is_paused(&self) -> bool;

    /// Elapsed seconds
    fn current_time(&self) -> f64;

    /// Move the play position
    fn set_current_time(&mut self, seconds: f64);

    /// Song length in seconds; NaN or infinite while unknown or live
    fn duration(&self) -> f64;

    /// Apply a volume level (0.0-1.0)
    fn set_volume(&mut self, level: f32);

    /// Apply a playback rate
    fn set_playback_rate(&mut self, rate: f32);

    /// Analyser node, when the host supports Web Audio
    fn analyser(&self) -> Option<&Self::Analyser> {
        None
    }
}

/// In-memory media element
///
/// Tracks everything a real element would report so players can run without
/// a browser. Time only moves when `advance` or `set_current_time` is called.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessElement {
    source: String,
    paused: bool,
    current_time: f64,
    duration: f64,
    volume: f32,
    playback_rate: f32,

    // Source and playback calls in order
    calls: Vec<&'static str>,
}

impl HeadlessElement {
    /// Paused element with no source
    pub fn new() -> Self {
        Self {
            source: String::new(),
            paused: true,
            current_time: 0.0,
            duration: f64::NAN,
            volume: 1.0,
            playback_rate: 1.0,
            calls: Vec::new(),
        }
    }

    /// Pretend the loaded source has this length
    pub fn set_duration(&mut self, seconds: f64) {
        self.duration = seconds;
    }

    /// Move time forward while playing; returns true when the song ended
    pub fn advance(&mut self, seconds: f64) -> bool {
        if self.paused {
            return false;
        }

        self.current_time += seconds * f64::from(self.playback_rate);
        if self.duration.is_finite() && self.current_time >= self.duration {
            self.current_time = self.duration;
            self.paused = true;
            return true;
        }
        false
    }

    /// Last applied volume level
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Last applied playback rate
    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    /// Number of `load` calls so far
    pub fn loads(&self) -> usize {
        self.calls.iter().filter(|call| **call == "load").count()
    }

    /// Source and playback calls received so far, oldest first
    ///
    /// Records `set_source`, `clear_source`, `load`, `play` and `pause`.
    pub fn calls(&self) -> &[&'static str] {
        &self.calls
    }
}

impl Default for HeadlessElement {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaElement for HeadlessElement {
    type Analyser = ();

    fn set_source(&mut self, url: &str) {
        self.calls.push("set_source");
        self.source = url.to_string();
        self.current_time = 0.0;
    }

    fn clear_source(&mut self) {
        self.calls.push("clear_source");
        self.source.clear();
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn load(&mut self) {
        self.calls.push("load");
    }

    fn play(&mut self) {
        self.calls.push("play");
        self.paused = false;
    }

    fn pause(&mut self) {
        self.calls.push("pause");
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds.max(0.0);
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.playback_rate = rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_only_while_playing() {
        let mut element = HeadlessElement::new();
        element.set_duration(10.0);

        assert!(!element.advance(3.0));
        assert_eq!(element.current_time(), 0.0);

        element.play();
        assert!(!element.advance(3.0));
        assert_eq!(element.current_time(), 3.0);
    }

    #[test]
    fn advance_reports_end() {
        let mut element = HeadlessElement::new();
        element.set_duration(10.0);
        element.play();

        assert!(element.advance(12.0));
        assert_eq!(element.current_time(), 10.0);
        assert!(element.is_paused());
    }

    #[test]
    fn advance_respects_playback_rate() {
        let mut element = HeadlessElement::new();
        element.set_duration(100.0);
        element.set_playback_rate(2.0);
        element.play();

        element.advance(5.0);
        assert_eq!(element.current_time(), 10.0);
    }

    #[test]
    fn new_source_rewinds() {
        let mut element = HeadlessElement::new();
        element.set_current_time(42.0);
        element.set_source("/music/a.mp3");

        assert_eq!(element.source(), "/music/a.mp3");
        assert_eq!(element.current_time(), 0.0);
        assert!(element.analyser().is_none());
    }
}
