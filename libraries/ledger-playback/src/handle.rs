//! Platform-agnostic playback handle trait
//!
//! Abstracts the native playable resource (an `<audio>` element in the
//! browser, a decoder-backed sink elsewhere).

use crate::error::Result;
use async_trait::async_trait;
use std::rc::Rc;

/// Native playable resource
///
/// Implementors wrap one platform audio object. Methods take `&self` because
/// native media objects carry their own interior state, and the coordinator
/// only ever sees a shared reference.
///
/// Everything runs on the single application event loop, so the trait is not
/// `Send`.
#[async_trait(?Send)]
pub trait PlaybackHandle {
    /// Issue the native play request
    ///
    /// Completes once the platform has actually begun playback.
    ///
    /// # Returns
    /// * `Ok(())` - Playback started
    /// * `Err(_)` - Permission denied, decode failure, network failure, etc.
    async fn play(&self) -> Result<()>;

    /// Issue the native pause command
    ///
    /// Fire-and-forget. The platform reports the transition later through a
    /// `Paused` native event.
    fn pause(&self);

    /// Reset the playback position to the start of the resource
    fn rewind(&self);

    /// Native play/pause state
    fn is_paused(&self) -> bool;

    /// Stop command: pause and reset position
    fn stop(&self) {
        self.pause();
        self.rewind();
    }
}

/// Strong reference held by the component that owns the resource
pub type SharedHandle = Rc<dyn PlaybackHandle>;
