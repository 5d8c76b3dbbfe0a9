//! Playback coordinator - the single playback slot
//!
//! Tracks which handle, if any, currently owns the output slot and notifies
//! subscribers on every ownership change.
//!
//! All access happens on the application event loop. No `RefCell` borrow is
//! held while a native handle or a subscriber runs, so both may call back
//! into the coordinator.

use crate::handle::{PlaybackHandle, SharedHandle};
use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

/// Zero-argument change callback
pub type SubscriberFn = Rc<dyn Fn()>;

/// Registry key of one subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Owner of the playback slot
///
/// The handle is weak: the coordinator borrows the resource while it is
/// active and never keeps it alive.
struct ActiveSlot {
    id: String,
    handle: Weak<dyn PlaybackHandle>,
}

impl ActiveSlot {
    fn new(handle: &SharedHandle, id: &str) -> Self {
        Self {
            id: id.to_string(),
            handle: Rc::downgrade(handle),
        }
    }

    /// Issue the native stop command, if the resource still exists
    fn stop(&self) {
        if let Some(handle) = self.handle.upgrade() {
            handle.stop();
        }
    }
}

#[derive(Default)]
struct SlotState {
    active: Option<ActiveSlot>,
    subscribers: Vec<(SubscriberId, SubscriberFn)>,
    next_subscriber: u64,
}

/// Process-wide playback coordinator
///
/// Create one at application start and pass clones to every binding. Clones
/// share state; separately constructed coordinators do not.
#[derive(Clone, Default)]
pub struct PlaybackCoordinator {
    inner: Rc<RefCell<SlotState>>,
}

impl PlaybackCoordinator {
    /// Create a coordinator with an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Give the slot to `handle` under identity `id`
    ///
    /// Stops whatever is currently active first. Calling twice with the same
    /// pair stops and reinstalls the same handle.
    pub fn acquire(&self, handle: &SharedHandle, id: &str) {
        let evicted = self.inner.borrow_mut().active.take();
        if let Some(slot) = &evicted {
            slot.stop();
        }

        // A stop command may have re-entered and installed another owner
        let displaced = self
            .inner
            .borrow_mut()
            .active
            .replace(ActiveSlot::new(handle, id));
        if let Some(slot) = &displaced {
            slot.stop();
        }

        debug!(
            id,
            evicted = evicted.as_ref().map(|slot| slot.id.as_str()),
            "Playback slot acquired"
        );
        self.notify();
    }

    /// Release the slot
    ///
    /// With `Some(id)`, only releases when `id` is the current owner; any
    /// other id is a no-op so a stale event can never evict the real owner.
    /// With `None`, releases whoever is active.
    pub fn release(&self, id: Option<&str>) {
        let released = {
            let mut state = self.inner.borrow_mut();
            let matches = match (state.active.as_ref(), id) {
                (_, None) => true,
                (Some(slot), Some(id)) => slot.id == id,
                (None, Some(_)) => false,
            };
            if !matches {
                trace!(id, "Ignoring release from non-owner");
                return;
            }
            state.active.take()
        };

        if let Some(slot) = &released {
            slot.stop();
        }

        debug!(
            released = released.as_ref().map(|slot| slot.id.as_str()),
            "Playback slot released"
        );
        self.notify();
    }

    /// Force-stop whatever is active
    pub fn release_all(&self) {
        self.release(None);
    }

    /// Identity of the current owner
    pub fn current_owner(&self) -> Option<String> {
        self.inner
            .borrow()
            .active
            .as_ref()
            .map(|slot| slot.id.clone())
    }

    /// Whether `id` is the recorded owner, regardless of native state
    pub fn is_owner(&self, id: &str) -> bool {
        self.inner
            .borrow()
            .active
            .as_ref()
            .is_some_and(|slot| slot.id == id)
    }

    /// Whether `id` owns the slot and its resource is actually playing
    ///
    /// The native state is checked too, since a pause can reach the resource
    /// before the corresponding release reaches the coordinator.
    pub fn is_active(&self, id: &str) -> bool {
        let handle = {
            let state = self.inner.borrow();
            match state.active.as_ref() {
                Some(slot) if slot.id == id => slot.handle.upgrade(),
                _ => None,
            }
        };
        handle.is_some_and(|handle| !handle.is_paused())
    }

    /// Register a change callback
    ///
    /// Registering a callback that is already registered is a no-op; the
    /// returned guard then refers to the existing entry. The callback stays
    /// registered until the guard is dropped or cancelled, or until
    /// [`unsubscribe`](Self::unsubscribe) is called with it.
    pub fn subscribe(&self, callback: SubscriberFn) -> Subscription {
        let mut state = self.inner.borrow_mut();

        let existing = state
            .subscribers
            .iter()
            .find(|(_, registered)| Rc::ptr_eq(registered, &callback))
            .map(|(id, _)| *id);

        let id = existing.unwrap_or_else(|| {
            let id = SubscriberId(state.next_subscriber);
            state.next_subscriber += 1;
            state.subscribers.push((id, callback));
            id
        });

        Subscription {
            id: Some(id),
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Remove a change callback; unknown callbacks are ignored
    pub fn unsubscribe(&self, callback: &SubscriberFn) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|(_, registered)| !Rc::ptr_eq(registered, callback));
    }

    /// Number of registered callbacks
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Invoke every current subscriber once
    ///
    /// A callback unsubscribed by an earlier callback of the same round is
    /// skipped. Callbacks subscribed during the round wait for the next one.
    /// A panicking subscriber is logged and skipped; the rest still run.
    fn notify(&self) {
        let callbacks: Vec<(SubscriberId, SubscriberFn)> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(id, callback)| (*id, Rc::clone(callback)))
            .collect();

        for (id, callback) in callbacks {
            if !self.is_subscribed(id) {
                continue;
            }
            if panic::catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
                warn!(subscriber = id.0, "Playback subscriber panicked during notification");
            }
        }
    }

    fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .any(|(registered, _)| *registered == id)
    }
}

impl fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("PlaybackCoordinator")
            .field("owner", &state.active.as_ref().map(|slot| &slot.id))
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

/// Registration guard returned by [`PlaybackCoordinator::subscribe`]
///
/// Dropping the guard unsubscribes. It holds the registry weakly, so it
/// does not keep the coordinator alive.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: Option<SubscriberId>,
    registry: Weak<RefCell<SlotState>>,
}

impl Subscription {
    /// Registry key, or `None` once cancelled
    pub fn id(&self) -> Option<SubscriberId> {
        self.id
    }

    /// Unsubscribe now; later calls do nothing
    pub fn cancel(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .subscribers
                .retain(|(registered, _)| *registered != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
