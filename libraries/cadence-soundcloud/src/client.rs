//! SoundCloud API client.

use crate::error::{ResolveError, Result};
use crate::types::SoundCloudTrack;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Public SoundCloud API
pub const DEFAULT_API_BASE: &str = "https://api.soundcloud.com";

/// Turns a SoundCloud page URL into track information.
#[async_trait]
pub trait TrackResolver: Send + Sync {
    /// Resolve one page URL
    async fn resolve(&self, url: &str) -> Result<SoundCloudTrack>;
}

/// HTTP client for the SoundCloud `/resolve` endpoint.
///
/// # Example
///
/// ```ignore
/// use cadence_soundcloud::{SoundCloudClient, TrackResolver};
///
/// let client = SoundCloudClient::new("my-client-id")?;
/// let track = client.resolve("https://soundcloud.com/artist/track").await?;
/// println!("{:?}", track.stream_url);
/// ```
pub struct SoundCloudClient {
    http: Client,
    api_base: String,
    client_id: String,
}

impl SoundCloudClient {
    /// Create a client for the public API.
    pub fn new(client_id: impl Into<String>) -> Result<Self> {
        Self::with_api_base(client_id, DEFAULT_API_BASE)
    }

    /// Create a client for another API base URL (proxies, tests).
    pub fn with_api_base(client_id: impl Into<String>, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();
        let parsed =
            Url::parse(&api_base).map_err(|e| ResolveError::InvalidUrl(format!("{}: {}", api_base, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ResolveError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let client_id = client_id.into();
        if client_id.trim().is_empty() {
            return Err(ResolveError::InvalidUrl("client id cannot be empty".into()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_base,
            client_id,
        })
    }

    /// API base URL without trailing slash.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl TrackResolver for SoundCloudClient {
    async fn resolve(&self, url: &str) -> Result<SoundCloudTrack> {
        let endpoint = format!("{}/resolve", self.api_base);

        debug!(url = %url, "Resolving SoundCloud URL");

        let response = self
            .http
            .get(&endpoint)
            .query(&[("url", url), ("client_id", self.client_id.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let track: SoundCloudTrack = response.json().await.map_err(|e| {
                ResolveError::ParseError(format!("Failed to parse track: {}", e))
            })?;

            debug!(
                url = %url,
                id = ?track.id,
                streamable = track.streamable,
                "Resolved SoundCloud URL"
            );

            Ok(track)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ResolveError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
