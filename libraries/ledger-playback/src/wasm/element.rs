//! `<audio>` element playback handle

use crate::{
    error::{PlaybackError, Result},
    handle::PlaybackHandle,
};
use async_trait::async_trait;
use tracing::warn;
use url::Url;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, HtmlAudioElement, HtmlMediaElement};

/// Playback handle backed by an `HtmlAudioElement`
#[derive(Debug, Clone)]
pub struct HtmlAudioHandle {
    element: HtmlAudioElement,
}

impl HtmlAudioHandle {
    /// Wrap an existing element
    pub fn new(element: HtmlAudioElement) -> Self {
        Self { element }
    }

    /// Create a detached element for `url`, preloading metadata only
    pub fn with_source(url: &Url) -> Result<Self> {
        let element = HtmlAudioElement::new_with_src(url.as_str()).map_err(js_error)?;
        element.set_preload("metadata");
        Ok(Self { element })
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    /// The element as a generic media element
    pub fn media(&self) -> &HtmlMediaElement {
        &self.element
    }
}

#[async_trait(?Send)]
impl PlaybackHandle for HtmlAudioHandle {
    async fn play(&self) -> Result<()> {
        let promise = self.element.play().map_err(js_error)?;
        JsFuture::from(promise).await.map_err(js_error)?;
        Ok(())
    }

    fn pause(&self) {
        if let Err(err) = self.element.pause() {
            warn!(error = ?err, "Pause rejected by audio element");
        }
    }

    fn rewind(&self) {
        self.element.set_current_time(0.0);
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }
}

/// Map a rejected play promise or thrown DOM error to a playback error
pub(crate) fn js_error(value: JsValue) -> PlaybackError {
    if let Some(exception) = value.dyn_ref::<DomException>() {
        return PlaybackError::from_dom_exception(&exception.name(), exception.message());
    }

    PlaybackError::Native(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
