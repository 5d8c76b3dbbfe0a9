/// Playback configuration
use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Configuration for voice memo playback
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// Base URL that attachment storage paths are appended to
    #[serde(default = "default_audio_base_url")]
    pub audio_base_url: String,

    /// Binding identity for controls without a storage path
    #[serde(default = "default_fallback_id")]
    pub fallback_id: String,
}

impl PlaybackConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables use the `LEDGER_` prefix, e.g.
    /// `LEDGER_AUDIO_BASE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path).required(false));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("LEDGER")
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.audio_base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(PlaybackError::Config(format!(
                "audio_base_url must be http(s), got {}",
                base.scheme()
            )));
        }

        if self.fallback_id.trim().is_empty() {
            return Err(PlaybackError::Config(
                "fallback_id must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_audio_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_fallback_id() -> String {
    "no-audio".to_string()
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            audio_base_url: default_audio_base_url(),
            fallback_id: default_fallback_id(),
        }
    }
}
