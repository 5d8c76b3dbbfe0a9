//! Native Events
//!
//! Lifecycle signals fired by a native playable resource. The host delivers
//! them to the owning binding or control:
//! - `Started` / `Paused` / `Ended` / `Error` drive slot ownership
//! - `LoadStart` / `CanPlay` only drive the control's loading indicator

use serde::{Deserialize, Serialize};

/// Events fired by a native playback resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum NativeEvent {
    /// Resource began playing (explicit start or out-of-band resume)
    Started,

    /// Resource paused
    Paused,

    /// Resource reached its end
    Ended,

    /// Resource failed to load or decode
    Error {
        /// Platform error description
        message: String,
    },

    /// Resource started fetching data
    LoadStart,

    /// Enough data is buffered to begin playback
    CanPlay,
}

impl NativeEvent {
    /// Map a DOM media event name to an event
    ///
    /// Returns `None` for names that carry no meaning here (`timeupdate`,
    /// `progress`, ...). `error` maps to an error with an empty message; the
    /// caller fills in details from the element when it has them.
    pub fn from_dom_name(name: &str) -> Option<Self> {
        match name {
            "play" | "playing" => Some(Self::Started),
            "pause" => Some(Self::Paused),
            "ended" => Some(Self::Ended),
            "error" => Some(Self::Error {
                message: String::new(),
            }),
            "loadstart" => Some(Self::LoadStart),
            "canplay" => Some(Self::CanPlay),
            _ => None,
        }
    }

    /// Canonical event name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Paused => "paused",
            Self::Ended => "ended",
            Self::Error { .. } => "error",
            Self::LoadStart => "load_start",
            Self::CanPlay => "can_play",
        }
    }

    /// Whether this event can change slot ownership
    pub fn affects_ownership(&self) -> bool {
        matches!(
            self,
            Self::Started | Self::Paused | Self::Ended | Self::Error { .. }
        )
    }
}
