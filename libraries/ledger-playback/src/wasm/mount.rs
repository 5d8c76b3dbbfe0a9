//! Mounting a browser audio element under an [`AudioControl`]

use super::{element::HtmlAudioHandle, listeners::MediaListeners};
use crate::{control::AudioControl, error::Result, handle::SharedHandle};
use std::rc::{Rc, Weak};

/// A live `<audio>` element wired to a control
///
/// Dropping it removes the DOM listeners and detaches the element from the
/// control, which gives up the playback slot if the element held it.
pub struct MountedAudio {
    handle: Rc<HtmlAudioHandle>,
    control: Weak<AudioControl>,
    _listeners: MediaListeners,
}

impl MountedAudio {
    /// Create an element for the control's URL and wire it up
    ///
    /// Returns `None` when the control has no URL to play.
    pub fn mount(control: &Rc<AudioControl>) -> Result<Option<Self>> {
        let Some(url) = control.url() else {
            return Ok(None);
        };

        let handle = Rc::new(HtmlAudioHandle::with_source(url)?);
        let weak = Rc::downgrade(control);
        let listeners = MediaListeners::attach(handle.media(), {
            let weak = weak.clone();
            move |event| {
                if let Some(control) = weak.upgrade() {
                    control.handle_event(&event);
                }
            }
        })?;

        let shared: SharedHandle = handle.clone();
        control.mount(shared);

        Ok(Some(Self {
            handle,
            control: weak,
            _listeners: listeners,
        }))
    }

    pub fn handle(&self) -> &HtmlAudioHandle {
        &self.handle
    }
}

impl Drop for MountedAudio {
    fn drop(&mut self) {
        if let Some(control) = self.control.upgrade() {
            control.unmount();
        }
    }
}
