//! Per-element playback binding
//!
//! Connects one native handle and one identity to the coordinator. The
//! binding subscribes its owner's re-render callback on creation and, on
//! drop, unsubscribes and gives up the slot if it still holds it.

use crate::{
    coordinator::{PlaybackCoordinator, SubscriberFn, Subscription},
    error::Result,
    events::NativeEvent,
    handle::SharedHandle,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Playback binding for one UI element
pub struct PlaybackBinding {
    id: String,
    coordinator: PlaybackCoordinator,
    handle: RefCell<Option<SharedHandle>>,
    subscription: Subscription,
}

impl PlaybackBinding {
    /// Bind identity `id` and subscribe `on_change` to slot changes
    ///
    /// Two bindings with the same id are treated as one logical resource and
    /// will take the slot from each other.
    pub fn new(
        coordinator: &PlaybackCoordinator,
        id: impl Into<String>,
        on_change: impl Fn() + 'static,
    ) -> Self {
        Self::with_callback(coordinator, id, Rc::new(on_change))
    }

    /// Like [`new`](Self::new) with a callback the caller keeps a reference to
    pub fn with_callback(
        coordinator: &PlaybackCoordinator,
        id: impl Into<String>,
        on_change: SubscriberFn,
    ) -> Self {
        Self {
            id: id.into(),
            coordinator: coordinator.clone(),
            handle: RefCell::new(None),
            subscription: coordinator.subscribe(on_change),
        }
    }

    /// Identity of this binding
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Attach the native resource once it exists
    ///
    /// Replacing the handle of the current owner releases the slot first.
    pub fn attach(&self, handle: SharedHandle) {
        if self.handle.borrow().is_some() && self.coordinator.is_owner(&self.id) {
            self.coordinator.release(Some(&self.id));
        }
        *self.handle.borrow_mut() = Some(handle);
    }

    /// Detach the native resource, releasing the slot if this binding owns it
    pub fn detach(&self) -> Option<SharedHandle> {
        let handle = self.handle.borrow_mut().take();
        if handle.is_some() && self.coordinator.is_owner(&self.id) {
            self.coordinator.release(Some(&self.id));
        }
        handle
    }

    /// Currently attached handle
    pub fn handle(&self) -> Option<SharedHandle> {
        self.handle.borrow().clone()
    }

    /// Take the slot and start native playback
    ///
    /// Does nothing while no handle is attached. If the native play request
    /// fails, the slot is released again and the error returned.
    ///
    /// The request completes asynchronously; by the time it resolves another
    /// binding may own the slot. Check [`is_active`](Self::is_active)
    /// afterwards rather than assuming playback.
    pub async fn start(&self) -> Result<()> {
        let Some(handle) = self.handle() else {
            debug!(id = %self.id, "Start ignored, no native handle attached");
            return Ok(());
        };

        self.coordinator.acquire(&handle, &self.id);

        if let Err(err) = handle.play().await {
            warn!(id = %self.id, error = %err, "Native play request failed");
            self.coordinator.release(Some(&self.id));
            return Err(err);
        }
        Ok(())
    }

    /// Pause native playback
    ///
    /// Ownership is released by the resulting `Paused` native event, not here.
    pub fn stop(&self) {
        if let Some(handle) = self.handle() {
            handle.pause();
        }
    }

    /// Whether this binding owns the slot and is audibly playing
    pub fn is_active(&self) -> bool {
        self.coordinator.is_active(&self.id)
    }

    /// Whether this binding is the recorded owner of the slot
    pub fn is_owner(&self) -> bool {
        self.coordinator.is_owner(&self.id)
    }

    /// React to a native lifecycle event of the attached resource
    pub fn handle_event(&self, event: &NativeEvent) {
        trace!(id = %self.id, event = event.name(), "Native event");
        match event {
            NativeEvent::Started => {
                if self.coordinator.is_owner(&self.id) {
                    return;
                }
                if let Some(handle) = self.handle() {
                    self.coordinator.acquire(&handle, &self.id);
                }
            }
            NativeEvent::Paused => {
                // Stale pauses from a handle that already lost the slot are dropped
                if self.coordinator.is_owner(&self.id) {
                    self.coordinator.release(Some(&self.id));
                }
            }
            NativeEvent::Ended => self.coordinator.release(Some(&self.id)),
            NativeEvent::Error { message } => {
                if self.coordinator.is_owner(&self.id) {
                    warn!(id = %self.id, %message, "Active resource failed");
                    self.coordinator.release(Some(&self.id));
                }
            }
            NativeEvent::LoadStart | NativeEvent::CanPlay => {}
        }
    }
}

impl Drop for PlaybackBinding {
    fn drop(&mut self) {
        self.subscription.cancel();
        if self.coordinator.is_owner(&self.id) {
            self.coordinator.release(Some(&self.id));
        }
    }
}

impl fmt::Debug for PlaybackBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackBinding")
            .field("id", &self.id)
            .field("attached", &self.handle.borrow().is_some())
            .field("subscription", &self.subscription)
            .finish()
    }
}
