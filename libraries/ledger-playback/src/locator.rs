//! Resource locator
//!
//! Maps an attachment's opaque storage path to a fetchable URL.

use crate::config::PlaybackConfig;
use crate::error::Result;
use tracing::warn;
use url::Url;

/// Resolves storage paths to resource URLs
pub trait ResourceLocator {
    /// URL for `path`, or `None` when no path is set or it cannot be resolved
    fn locate(&self, path: Option<&str>) -> Option<Url>;
}

/// Locator that appends storage paths to a fixed base URL
#[derive(Debug, Clone)]
pub struct BaseUrlLocator {
    base: String,
}

impl BaseUrlLocator {
    /// Create a locator for `base`
    pub fn new(base: impl Into<String>) -> Result<Self> {
        let base = base.into();
        Url::parse(&base)?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// Create a locator from configuration
    pub fn from_config(config: &PlaybackConfig) -> Result<Self> {
        Self::new(config.audio_base_url.as_str())
    }

    /// Base URL without trailing slash
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl ResourceLocator for BaseUrlLocator {
    fn locate(&self, path: Option<&str>) -> Option<Url> {
        let path = path.map(str::trim).filter(|path| !path.is_empty())?;
        let joined = if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        };

        match Url::parse(&joined) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(path, error = %err, "Could not build audio URL");
                None
            }
        }
    }
}
