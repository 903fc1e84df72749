use std::path::Path;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::engine::{AudioError, PlaybackEngine, probe_duration};
use super::sink::create_sink;

/// The rodio-backed playback engine.
///
/// Owns the process-wide output stream and at most one `Sink`. Elapsed
/// time is tracked from the `Instant` playback started; the player never
/// pauses, so no accumulation is needed.
pub struct AudioPlayer {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
    started_at: Option<Instant>,
}

impl AudioPlayer {
    /// Open the default output device. Failing to find one is fatal for
    /// the application, so this runs once at startup.
    pub fn new() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a console app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            volume: 1.0,
            started_at: None,
        })
    }
}

impl PlaybackEngine for AudioPlayer {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.started_at = None;

        let sink = create_sink(&self.stream, path)?;
        sink.set_volume(self.volume);
        self.sink = Some(sink);
        Ok(())
    }

    fn play(&mut self) {
        if let Some(s) = &self.sink {
            s.play();
            self.started_at = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.started_at = None;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(s) = &self.sink {
            s.set_volume(volume);
        }
    }

    fn is_busy(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }

    fn elapsed(&self) -> Duration {
        self.started_at.map_or(Duration::ZERO, |t| t.elapsed())
    }

    fn total_duration(&self, path: &Path) -> Result<Duration, AudioError> {
        probe_duration(path)
    }

    fn arm_end_notification(&mut self) {
        // Nothing to arm: the sink drains on natural end and that is
        // already visible through `is_busy` and `elapsed`.
    }
}
