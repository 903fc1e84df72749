//! Playback: the engine trait boundary plus the rodio-backed player.

mod engine;
mod player;
mod sink;

pub use engine::{AudioError, PlaybackEngine, probe_duration};
pub use player::AudioPlayer;
