//! Voice memo audio control
//!
//! View model behind the play/pause button shown next to an audio
//! transaction. It owns the binding for the current storage path and keeps
//! the loading and failure indicators the button renders.

use crate::{
    binding::PlaybackBinding,
    context::PlaybackContext,
    coordinator::SubscriberFn,
    error::{PlaybackError, Result},
    events::NativeEvent,
    handle::SharedHandle,
    types::ControlState,
};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, error};
use url::Url;

/// Play/pause control for one voice memo
pub struct AudioControl {
    context: PlaybackContext,
    audio_path: Option<String>,
    url: Option<Url>,
    transcript: Option<String>,
    binding: PlaybackBinding,
    on_change: SubscriberFn,
    loading: Cell<bool>,
    failed: Cell<bool>,
}

impl AudioControl {
    /// Create a control for `audio_path`
    ///
    /// `on_change` runs on every slot change and every change of this
    /// control's own indicators.
    pub fn new(
        context: &PlaybackContext,
        audio_path: Option<String>,
        transcript: Option<String>,
        on_change: impl Fn() + 'static,
    ) -> Self {
        let on_change: SubscriberFn = Rc::new(on_change);
        let binding = Self::bind(context, audio_path.as_deref(), &on_change);
        let url = context.locator().locate(audio_path.as_deref());

        Self {
            context: context.clone(),
            audio_path,
            url,
            transcript,
            binding,
            on_change,
            loading: Cell::new(false),
            failed: Cell::new(false),
        }
    }

    fn bind(
        context: &PlaybackContext,
        audio_path: Option<&str>,
        on_change: &SubscriberFn,
    ) -> PlaybackBinding {
        // Distinct registration per binding: dropping the outgoing binding
        // must not unsubscribe its replacement
        let on_change = Rc::clone(on_change);
        PlaybackBinding::new(
            context.coordinator(),
            context.binding_id(audio_path),
            move || on_change(),
        )
    }

    /// Attach the native resource created for [`url`](Self::url)
    pub fn mount(&self, handle: SharedHandle) {
        self.binding.attach(handle);
    }

    /// Detach the native resource
    pub fn unmount(&self) -> Option<SharedHandle> {
        self.binding.detach()
    }

    /// Binding identity
    pub fn id(&self) -> &str {
        self.binding.id()
    }

    pub fn audio_path(&self) -> Option<&str> {
        self.audio_path.as_deref()
    }

    /// Resolved resource URL, if the memo has one
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn binding(&self) -> &PlaybackBinding {
        &self.binding
    }

    /// Whether this memo is the one audibly playing
    pub fn is_playing(&self) -> bool {
        self.binding.is_active()
    }

    /// Current display state
    pub fn state(&self) -> ControlState {
        if self.url.is_none() {
            ControlState::Unavailable
        } else if self.failed.get() {
            ControlState::Failed
        } else if self.loading.get() {
            ControlState::Loading
        } else if self.binding.is_active() {
            ControlState::Playing
        } else {
            ControlState::Idle
        }
    }

    /// Play/pause button press
    ///
    /// Pauses when playing, starts otherwise. A failed start puts the control
    /// into [`ControlState::Failed`] and returns the error; presses in that
    /// state return [`PlaybackError::Disabled`] until the path changes. A
    /// start interrupted by another control taking the slot is returned but
    /// leaves the control usable.
    pub async fn toggle(&self) -> Result<()> {
        let state = self.state();
        if !state.accepts_input() {
            return match state {
                ControlState::Failed => Err(PlaybackError::Disabled(self.id().to_string())),
                _ => Ok(()),
            };
        }

        if state == ControlState::Playing {
            self.binding.stop();
            return Ok(());
        }

        self.set_loading(true);
        let result = self.binding.start().await;
        self.loading.set(false);

        match &result {
            Err(err) if err.is_interruption() => {
                debug!(id = %self.id(), error = %err, "Play request interrupted");
            }
            Err(err) => {
                error!(id = %self.id(), error = %err, "Audio playback error");
                self.failed.set(true);
            }
            Ok(()) => {}
        }
        self.changed();
        result
    }

    /// React to a native event of the mounted resource
    pub fn handle_event(&self, event: &NativeEvent) {
        if event.affects_ownership() {
            self.binding.handle_event(event);
        }

        match event {
            NativeEvent::LoadStart => self.loading.set(true),
            NativeEvent::CanPlay => self.loading.set(false),
            NativeEvent::Error { message } => {
                error!(id = %self.id(), %message, "Failed to load audio");
                self.failed.set(true);
                self.loading.set(false);
            }
            NativeEvent::Started | NativeEvent::Paused | NativeEvent::Ended => return,
        }
        self.changed();
    }

    /// Point the control at a different storage path
    ///
    /// A changed path gets a fresh binding (the old one gives up the slot),
    /// a freshly resolved URL, and a cleared failure. The caller mounts a
    /// handle for the new URL. Returns whether anything changed.
    pub fn set_audio_path(&mut self, audio_path: Option<String>) -> bool {
        if audio_path == self.audio_path {
            return false;
        }
        debug!(from = ?self.audio_path, to = ?audio_path, "Audio path changed");

        self.binding = Self::bind(&self.context, audio_path.as_deref(), &self.on_change);
        self.url = self.context.locator().locate(audio_path.as_deref());
        self.audio_path = audio_path;
        self.failed.set(false);
        self.loading.set(false);
        self.changed();
        true
    }

    /// Replace the transcript shown next to the control
    pub fn set_transcript(&mut self, transcript: Option<String>) {
        self.transcript = transcript;
    }

    fn set_loading(&self, loading: bool) {
        if self.loading.replace(loading) != loading {
            self.changed();
        }
    }

    fn changed(&self) {
        (self.on_change)();
    }
}

impl std::fmt::Debug for AudioControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioControl")
            .field("id", &self.id())
            .field("url", &self.url.as_ref().map(Url::as_str))
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
