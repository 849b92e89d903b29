//! Error types for SoundCloud resolution.

use thiserror::Error;

/// Errors that can occur while resolving a SoundCloud URL.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse the API response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The track exists but cannot be streamed
    #[error("{name} by {artist} is not streamable by the SoundCloud API")]
    NotStreamable { name: String, artist: String },

    /// The track is streamable but came without a stream URL
    #[error("No stream URL for {0}")]
    MissingStreamUrl(String),

    /// Invalid API base URL or track URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
