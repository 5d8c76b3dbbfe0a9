//! DOM media event listeners

use super::element::js_error;
use crate::{error::Result, events::NativeEvent};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, HtmlMediaElement};

/// DOM events forwarded as native events
const MEDIA_EVENTS: [&str; 6] = ["play", "pause", "ended", "error", "loadstart", "canplay"];

/// Listener registrations on one media element
///
/// Every listener is removed when this value is dropped, so no callback
/// outlives the component that installed it.
pub struct MediaListeners {
    target: HtmlMediaElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl MediaListeners {
    /// Forward the element's media events to `sink`
    pub fn attach(element: &HtmlMediaElement, sink: impl Fn(NativeEvent) + 'static) -> Result<Self> {
        let sink: Rc<dyn Fn(NativeEvent)> = Rc::new(sink);
        // Built first so a failed registration still removes the earlier ones
        let mut this = Self {
            target: element.clone(),
            listeners: Vec::with_capacity(MEDIA_EVENTS.len()),
        };

        for name in MEDIA_EVENTS {
            let sink = Rc::clone(&sink);
            let source = element.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                let Some(mut event) = NativeEvent::from_dom_name(name) else {
                    return;
                };
                if let NativeEvent::Error { message } = &mut event {
                    *message = describe_media_error(&source);
                }
                sink(event);
            });

            element
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .map_err(js_error)?;
            this.listeners.push((name, closure));
        }

        Ok(this)
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Drop for MediaListeners {
    fn drop(&mut self) {
        for (name, closure) in &self.listeners {
            // Removal only fails for a detached target, which no longer fires
            let _ = self
                .target
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}

fn describe_media_error(element: &HtmlMediaElement) -> String {
    match element.error() {
        Some(error) if !error.message().is_empty() => {
            format!("media error {}: {}", error.code(), error.message())
        }
        Some(error) => format!("media error {}", error.code()),
        None => "media error".to_string(),
    }
}
