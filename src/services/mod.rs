//! External service module
//!
//! This module contains the audio playback collaborator and the host
//! checks that go with it.

pub mod audio;
pub mod system;

// Re-export main types and functions
pub use audio::{AudioAsset, AudioCue, AudioEvent, CommandAudioCue, SilentAudioCue};
pub use system::check_player_available;
