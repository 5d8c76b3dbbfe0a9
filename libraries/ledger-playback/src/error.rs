//! Error types for voice memo playback

use thiserror::Error;

/// Playback errors
///
/// Coordinator bookkeeping never fails. These errors come from the native
/// play request or from loading configuration.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Native playback failed (decode error or unspecified failure)
    #[error("Native playback failed: {0}")]
    Native(String),

    /// Playback blocked by the platform (autoplay policy, missing permission)
    #[error("Playback permission denied: {0}")]
    PermissionDenied(String),

    /// The resource has no decodable source
    #[error("Unsupported audio source: {0}")]
    Unsupported(String),

    /// Fetching the resource failed
    #[error("Network error: {0}")]
    Network(String),

    /// The play request was interrupted by a pause or a new load
    #[error("Play request aborted: {0}")]
    Aborted(String),

    /// Play attempted on a control that already failed for this resource
    #[error("Playback disabled after failure: {0}")]
    Disabled(String),

    /// A resource URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlaybackError {
    /// Create a native playback error
    pub fn native(msg: impl Into<String>) -> Self {
        Self::Native(msg.into())
    }

    /// Map a `DOMException` name from the native play request
    pub fn from_dom_exception(name: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match name {
            "NotAllowedError" | "SecurityError" => Self::PermissionDenied(message),
            "NotSupportedError" => Self::Unsupported(message),
            "AbortError" => Self::Aborted(message),
            "NetworkError" => Self::Network(message),
            _ => Self::Native(message),
        }
    }

    /// Whether the play request was cut short rather than failing
    ///
    /// An interrupted request says nothing about the resource itself.
    pub fn is_interruption(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }
}

impl From<config::ConfigError> for PlaybackError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
