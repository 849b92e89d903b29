//! `MediaElement` over a browser `<audio>` element

use crate::media::MediaElement;
use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

/// Page audio element driven by the player
///
/// The source URL is mirrored locally so `source` can hand out a `&str`.
pub struct AudioElement {
    element: HtmlAudioElement,
    source: String,
    analyser: Option<JsValue>,
}

impl AudioElement {
    /// Wrap an existing `<audio>` element
    pub fn new(element: HtmlAudioElement) -> Self {
        let source = element.src();
        Self {
            element,
            source,
            analyser: None,
        }
    }

    /// Create a detached `<audio>` element
    pub fn create() -> Result<Self, JsValue> {
        Ok(Self::new(HtmlAudioElement::new()?))
    }

    /// Analyser node built by the page for visualizations
    pub fn set_analyser(&mut self, analyser: JsValue) {
        self.analyser = Some(analyser);
    }

    /// The wrapped element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl MediaElement for AudioElement {
    type Analyser = JsValue;

    fn set_source(&mut self, url: &str) {
        self.element.set_src(url);
        self.source = url.to_string();
    }

    fn clear_source(&mut self) {
        self.element.set_src("");
        self.source.clear();
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn load(&mut self) {
        self.element.load();
    }

    fn play(&mut self) {
        // The returned promise rejects when autoplay is blocked; nothing to
        // recover here
        if let Err(e) = self.element.play() {
            tracing::debug!(error = ?e, "play() rejected");
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            tracing::debug!(error = ?e, "pause() failed");
        }
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }

    fn set_volume(&mut self, level: f32) {
        self.element.set_volume(f64::from(level));
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.element.set_playback_rate(f64::from(rate));
    }

    fn analyser(&self) -> Option<&JsValue> {
        self.analyser.as_ref()
    }
}
