//! WASM bindings for cadence-playback
//!
//! Drives a page's `<audio>` element from JavaScript through the same
//! `Player` the native tests use.

pub mod element;
pub mod player;

pub use element::AudioElement;
pub use player::WasmPlayer;
