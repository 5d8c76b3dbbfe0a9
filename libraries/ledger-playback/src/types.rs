//! Core types for voice memo playback

use serde::{Deserialize, Serialize};

/// What an audio control should display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlState {
    /// No resource URL; only the transcript (if any) is shown
    Unavailable,

    /// Ready to play
    Idle,

    /// Fetching data or waiting for the play request to settle
    Loading,

    /// Owns the playback slot and is audibly playing
    Playing,

    /// Playback failed; further attempts disabled until the path changes
    Failed,
}

impl ControlState {
    /// Whether the play/pause button accepts input
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::Idle | Self::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_and_playing_accept_input() {
        assert!(ControlState::Idle.accepts_input());
        assert!(ControlState::Playing.accepts_input());
        assert!(!ControlState::Loading.accepts_input());
        assert!(!ControlState::Failed.accepts_input());
        assert!(!ControlState::Unavailable.accepts_input());
    }
}
