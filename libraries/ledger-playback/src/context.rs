//! Shared playback context
//!
//! Everything a voice memo control needs from the application: the one
//! coordinator, the resource locator, and the fallback identity.

use crate::{
    config::PlaybackConfig,
    coordinator::PlaybackCoordinator,
    error::Result,
    locator::{BaseUrlLocator, ResourceLocator},
};
use std::rc::Rc;

/// Application-wide playback context
///
/// Built once at startup; clones share the same coordinator.
#[derive(Clone)]
pub struct PlaybackContext {
    coordinator: PlaybackCoordinator,
    locator: Rc<dyn ResourceLocator>,
    fallback_id: String,
}

impl PlaybackContext {
    /// Build a context from configuration
    pub fn new(config: &PlaybackConfig) -> Result<Self> {
        config.validate()?;
        let locator = BaseUrlLocator::from_config(config)?;
        Ok(Self::with_locator(
            PlaybackCoordinator::new(),
            Rc::new(locator),
            config.fallback_id.clone(),
        ))
    }

    /// Build a context from parts
    pub fn with_locator(
        coordinator: PlaybackCoordinator,
        locator: Rc<dyn ResourceLocator>,
        fallback_id: impl Into<String>,
    ) -> Self {
        Self {
            coordinator,
            locator,
            fallback_id: fallback_id.into(),
        }
    }

    pub fn coordinator(&self) -> &PlaybackCoordinator {
        &self.coordinator
    }

    pub fn locator(&self) -> &dyn ResourceLocator {
        self.locator.as_ref()
    }

    /// Identity used for a missing storage path
    pub fn fallback_id(&self) -> &str {
        &self.fallback_id
    }

    /// Binding identity for a storage path
    pub fn binding_id(&self, audio_path: Option<&str>) -> String {
        audio_path
            .filter(|path| !path.is_empty())
            .unwrap_or(&self.fallback_id)
            .to_string()
    }
}

impl std::fmt::Debug for PlaybackContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackContext")
            .field("coordinator", &self.coordinator)
            .field("fallback_id", &self.fallback_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_id_falls_back_for_missing_path() {
        let context = PlaybackContext::new(&PlaybackConfig::default()).unwrap();
        assert_eq!(context.binding_id(Some("/uploads/a.webm")), "/uploads/a.webm");
        assert_eq!(context.binding_id(None), "no-audio");
        assert_eq!(context.binding_id(Some("")), "no-audio");
    }

    #[test]
    fn clones_share_one_coordinator() {
        let context = PlaybackContext::new(&PlaybackConfig::default()).unwrap();
        let clone = context.clone();
        let _subscription = context.coordinator().subscribe(Rc::new(|| {}));
        assert_eq!(clone.coordinator().subscriber_count(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PlaybackConfig {
            audio_base_url: "mailto:ops@example.com".to_string(),
            ..PlaybackConfig::default()
        };
        assert!(PlaybackContext::new(&config).is_err());
    }
}
