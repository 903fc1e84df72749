//! The playback engine seam: error type, capability trait and the
//! duration probe shared by implementations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;
use thiserror::Error;

/// Errors surfaced by a playback engine.
///
/// Apart from [`AudioError::Device`], which is fatal at startup, these
/// are recoverable at the menu: the shell reports them and keeps
/// running.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("failed to probe {path:?}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },
}

/// The audio decode/output collaborator the session delegates to.
///
/// The production implementation is [`AudioPlayer`](super::AudioPlayer);
/// tests substitute a scripted double.
pub trait PlaybackEngine {
    /// Load the file at `path`, replacing whatever was loaded before.
    /// No sound is produced until [`play`](Self::play).
    fn load(&mut self, path: &Path) -> Result<(), AudioError>;

    /// Start producing audio for the loaded track.
    fn play(&mut self);

    /// Stop playback and drop the loaded track.
    fn stop(&mut self);

    /// Set the output volume in `[0.0, 1.0]`. Applies to the track
    /// currently playing (if any) and to future loads.
    fn set_volume(&mut self, volume: f32);

    /// Whether the engine still has audio to produce.
    fn is_busy(&self) -> bool;

    /// Elapsed playback position of the current track.
    fn elapsed(&self) -> Duration;

    /// Total duration of the file at `path`.
    fn total_duration(&self, path: &Path) -> Result<Duration, AudioError>;

    /// Ask the engine to watch for natural end-of-track. Optional: an
    /// engine may report completion through `is_busy`/`elapsed` alone.
    fn arm_end_notification(&mut self);
}

/// Read the total duration of an audio file from its container data.
pub fn probe_duration(path: &Path) -> Result<Duration, AudioError> {
    let tagged = lofty::read_from_path(path).map_err(|source| AudioError::Probe {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(tagged.properties().duration())
}
