//! Ledger Admin - Voice Memo Playback
//!
//! Guarantees that across any number of independently mounted audio
//! controls, at most one plays at a time.
//!
//! This crate provides:
//! - A playback coordinator owning the single playback slot
//! - Per-element bindings wiring native resource events to the coordinator
//! - Change subscriptions released on drop
//! - A voice memo control view model (loading/failure indicators)
//! - A resource locator for attachment storage paths
//! - Optional browser `<audio>` support (`wasm` feature)
//!
//! # Architecture
//!
//! Everything runs on the single application event loop: the coordinator
//! is `Rc`-shared, not locked. Create one coordinator at application start
//! and hand clones to every binding.
//!
//! The native resource is abstracted by [`PlaybackHandle`]. The coordinator
//! only keeps a weak reference to the active handle; the component that
//! created the resource owns it.
//!
//! # Example: Two Bindings
//!
//! ```rust
//! use ledger_playback::{PlaybackBinding, PlaybackCoordinator, PlaybackHandle, Result};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! #[derive(Default)]
//! struct Silent {
//!     paused: Cell<bool>,
//! }
//!
//! #[async_trait::async_trait(?Send)]
//! impl PlaybackHandle for Silent {
//!     async fn play(&self) -> Result<()> {
//!         self.paused.set(false);
//!         Ok(())
//!     }
//!     fn pause(&self) {
//!         self.paused.set(true);
//!     }
//!     fn rewind(&self) {}
//!     fn is_paused(&self) -> bool {
//!         self.paused.get()
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let coordinator = PlaybackCoordinator::new();
//!
//! let first = PlaybackBinding::new(&coordinator, "memo-1", || {});
//! let second = PlaybackBinding::new(&coordinator, "memo-2", || {});
//! first.attach(Rc::new(Silent::default()));
//! second.attach(Rc::new(Silent::default()));
//!
//! first.start().await?;
//! second.start().await?;
//!
//! assert_eq!(coordinator.current_owner().as_deref(), Some("memo-2"));
//! assert!(!first.is_active());
//! # Ok::<(), ledger_playback::PlaybackError>(())
//! # }).unwrap();
//! ```

mod binding;
mod config;
mod context;
mod control;
mod coordinator;
mod error;
pub mod events;
mod handle;
mod locator;
pub mod types;
pub mod wasm;

// Public exports
pub use binding::PlaybackBinding;
pub use config::PlaybackConfig;
pub use context::PlaybackContext;
pub use control::AudioControl;
pub use coordinator::{PlaybackCoordinator, SubscriberFn, SubscriberId, Subscription};
pub use error::{PlaybackError, Result};
pub use events::NativeEvent;
pub use handle::{PlaybackHandle, SharedHandle};
pub use locator::{BaseUrlLocator, ResourceLocator};
pub use types::ControlState;
