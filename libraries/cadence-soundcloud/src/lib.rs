//! Cadence SoundCloud
//!
//! Resolves SoundCloud page URLs in a song collection into streamable URLs
//! before the player is constructed.
//!
//! # Features
//!
//! - **Resolution**: `/resolve` lookups through `SoundCloudClient`
//! - **Batch preparation**: every SoundCloud song requested at once, awaited together
//! - **Cover art**: optional replacement with SoundCloud artwork
//!
//! # Example
//!
//! ```ignore
//! use cadence_core::PlayerConfig;
//! use cadence_soundcloud::{prepare_config, SoundCloudClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = PlayerConfig::load(Some("player.toml".as_ref()))?;
//!     let client_id = config.soundcloud.as_ref().map(|s| s.client_id.clone()).unwrap_or_default();
//!     let client = SoundCloudClient::new(client_id)?;
//!
//!     if let Some(report) = prepare_config(&mut config, &client).await {
//!         println!("{} of {} songs resolved", report.resolved.len(), report.requested());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod resolve;
mod types;

pub use client::{SoundCloudClient, TrackResolver, DEFAULT_API_BASE};
pub use error::{ResolveError, Result};
pub use resolve::{prepare_config, resolve_songs, ResolutionFailure, ResolutionReport};
pub use types::{is_soundcloud_url, SoundCloudTrack, SoundCloudUser};
