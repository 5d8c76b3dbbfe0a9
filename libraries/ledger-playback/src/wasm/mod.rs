//! WASM bindings for ledger-playback
//!
//! Browser implementation of the native handle over `<audio>` elements and
//! the DOM listener wiring that feeds media events into an [`AudioControl`].
//!
//! [`AudioControl`]: crate::AudioControl

#[cfg(feature = "wasm")]
pub mod element;

#[cfg(feature = "wasm")]
pub mod listeners;

#[cfg(feature = "wasm")]
pub mod mount;

#[cfg(feature = "wasm")]
pub use element::HtmlAudioHandle;

#[cfg(feature = "wasm")]
pub use listeners::MediaListeners;

#[cfg(feature = "wasm")]
pub use mount::MountedAudio;
