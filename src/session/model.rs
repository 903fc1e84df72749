//! Session model types: `SessionState`, `Playback` and the `Session`
//! state machine driving the playback interaction loop.

use std::io::{BufRead, Write};
use std::path::Path;

use thiserror::Error;

use crate::audio::{AudioError, PlaybackEngine};
use crate::config::{LibrarySettings, PlaybackSettings};
use crate::library::{self, Track};
use crate::ui;

/// Failures a session operation can surface. Audio errors are
/// recoverable at the menu; I/O errors mean the console itself is gone.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The playback phase of the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Playback {
    /// No track loaded.
    Idle,
    /// A track is loaded and producing audio.
    Playing,
    /// The user explicitly stopped playback.
    Stopped,
}

/// The in-memory state governing one run of the player.
///
/// Lives only in process memory; every startup seeds it from the
/// configured playback defaults.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Position of the last explicitly selected track. Informational
    /// only: next/previous do not consult it, both resolve to a random
    /// pick.
    pub current_index: usize,
    /// Whether the next `play_track` arms the end-of-track notification.
    pub loop_enabled: bool,
    volume: f32,
}

impl SessionState {
    pub fn new(defaults: &PlaybackSettings) -> Self {
        Self {
            current_index: 0,
            loop_enabled: defaults.loop_enabled,
            volume: defaults.volume,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the volume. Values outside `[0.0, 1.0]` (NaN included) are
    /// rejected with the prior value retained; returns whether the value
    /// was accepted.
    pub fn set_volume(&mut self, volume: f32) -> bool {
        if (0.0..=1.0).contains(&volume) {
            self.volume = volume;
            true
        } else {
            false
        }
    }

    /// Flip the loop flag and return the new value. Takes effect on the
    /// next `play_track`; an already-playing track is unaffected.
    pub fn toggle_loop(&mut self) -> bool {
        self.loop_enabled = !self.loop_enabled;
        self.loop_enabled
    }
}

/// The playback session: a thin state machine over a [`PlaybackEngine`].
///
/// All operations take the input/output streams explicitly so the whole
/// interaction can run against plain buffers in tests. `&mut self` on
/// every operation rules out a second interaction loop starting while
/// one is active.
pub struct Session<E> {
    pub(crate) engine: E,
    pub state: SessionState,
    pub playback: Playback,
    library: LibrarySettings,
}

impl<E: PlaybackEngine> Session<E> {
    pub fn new(engine: E, state: SessionState, library: LibrarySettings) -> Self {
        Self {
            engine,
            state,
            playback: Playback::Idle,
            library,
        }
    }

    /// Play `track`, then keep the session busy until the user stops it,
    /// the catalog runs dry, or the engine drains.
    ///
    /// This is the blocking interaction loop at the heart of the player.
    /// While the engine reports busy, each iteration first checks whether
    /// the track has reached its total duration (auto-advancing to a new
    /// random pick when it has) and then blocks on one line of input:
    /// `s` stops, `r` swaps in a random track, anything else falls
    /// through to the next completion check. Skip and auto-advance both
    /// continue the outer loop with a fresh track instead of recursing,
    /// so a long session cannot grow the call stack.
    ///
    /// The completion check is input-gated: past the first iteration it
    /// only runs once the blocking read returns, so a finished track can
    /// sit at the prompt until the user presses a key.
    pub fn play_track<R: BufRead, W: Write>(
        &mut self,
        dir: &Path,
        track: Track,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), SessionError> {
        let mut next = Some(track);

        while let Some(track) = next.take() {
            if let Err(e) = self.engine.load(&track.path) {
                self.playback = Playback::Idle;
                return Err(e.into());
            }
            self.engine.set_volume(self.state.volume());
            if self.state.loop_enabled {
                self.engine.arm_end_notification();
            }
            self.engine.play();
            self.playback = Playback::Playing;

            ui::clear_screen(out)?;
            writeln!(out, "Now playing: {}", track.name)?;

            let total = match self.engine.total_duration(&track.path) {
                Ok(total) => total,
                Err(e) => {
                    // Don't leave audio running with nothing able to
                    // reach it once this returns.
                    self.engine.stop();
                    self.playback = Playback::Idle;
                    return Err(e.into());
                }
            };

            while self.engine.is_busy() {
                if self.engine.elapsed() >= total {
                    writeln!(out, "Song finished.")?;
                    next = self.next_random(dir, out)?;
                    break;
                }

                ui::prompt(
                    out,
                    "Enter 's' to stop the music or enter 'r' to skip to a random song : ",
                )?;
                let Some(line) = ui::read_line(input)? else {
                    // End of input: treat like an explicit stop.
                    self.engine.stop();
                    self.playback = Playback::Stopped;
                    return Ok(());
                };

                match line.trim().to_ascii_lowercase().as_str() {
                    "s" => {
                        self.engine.stop();
                        writeln!(out, "\nMusic stopped.")?;
                        self.playback = Playback::Stopped;
                        return Ok(());
                    }
                    "r" => {
                        if let Some(t) = self.next_random(dir, out)? {
                            next = Some(t);
                            break;
                        }
                        // Nothing to skip to; the current track keeps
                        // playing.
                    }
                    _ => {}
                }
            }

            if next.is_none() {
                // The engine drained, or the catalog came up empty on
                // auto-advance; either way nothing else is queued.
                self.playback = Playback::Idle;
            }
        }

        Ok(())
    }

    /// Play a random track from `dir`. An empty catalog is reported and
    /// leaves the session untouched; the engine is never asked to load.
    pub fn play_random<R: BufRead, W: Write>(
        &mut self,
        dir: &Path,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), SessionError> {
        match library::pick_random(dir, &self.library) {
            Some(track) => self.play_track(dir, track, input, out),
            None => {
                writeln!(out, "No MP3 files found in the directory.")?;
                Ok(())
            }
        }
    }

    /// List the catalog and let the user pick a track by number.
    ///
    /// `0` cancels back to the menu. Out-of-range or non-numeric input
    /// re-prompts; this is an interactive retry loop, not a single-shot
    /// validation.
    pub fn play_selected<R: BufRead, W: Write>(
        &mut self,
        dir: &Path,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), SessionError> {
        let tracks = library::list_tracks(dir, &self.library);
        if tracks.is_empty() {
            writeln!(out, "No MP3 files found in the directory.")?;
            return Ok(());
        }

        ui::clear_screen(out)?;
        writeln!(out, "Available Songs:")?;
        for (i, track) in tracks.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, track.name)?;
        }

        loop {
            ui::prompt(
                out,
                "Enter the number of the song you want to play (or 0 to go back): ",
            )?;
            let Some(line) = ui::read_line(input)? else {
                return Ok(());
            };

            match line.trim().parse::<usize>() {
                Ok(0) => return Ok(()),
                Ok(n) if n <= tracks.len() => {
                    self.state.current_index = n - 1;
                    let track = tracks[n - 1].clone();
                    return self.play_track(dir, track, input, out);
                }
                Ok(_) => {
                    writeln!(out, "Invalid choice. Please enter a number within the range.")?;
                }
                Err(_) => {
                    writeln!(out, "Invalid input. Please enter a number.")?;
                }
            }
        }
    }

    /// Flip looping and report the new state.
    pub fn toggle_loop<W: Write>(&mut self, out: &mut W) -> Result<(), SessionError> {
        let enabled = self.state.toggle_loop();
        writeln!(
            out,
            "Looping is {}",
            if enabled { "enabled" } else { "disabled" }
        )?;
        Ok(())
    }

    /// Prompt for a new volume level until a value in `[0.0, 1.0]` is
    /// given, then apply it to the session and the engine.
    pub fn change_volume<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), SessionError> {
        ui::clear_screen(out)?;
        loop {
            ui::prompt(out, "Enter the volume level (0.0 to 1.0): ")?;
            let Some(line) = ui::read_line(input)? else {
                return Ok(());
            };

            match line.trim().parse::<f32>() {
                Ok(v) => {
                    if self.state.set_volume(v) {
                        self.engine.set_volume(v);
                        writeln!(out, "Volume level set to {v}")?;
                        return Ok(());
                    }
                    writeln!(out, "Volume level must be between 0.0 and 1.0.")?;
                }
                Err(_) => {
                    writeln!(out, "Invalid input. Please enter a number between 0.0 and 1.0.")?;
                }
            }
        }
    }

    /// Skip to the next track. The catalog has no directional ordering,
    /// so this resolves to a random pick.
    pub fn skip_next<R: BufRead, W: Write>(
        &mut self,
        dir: &Path,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), SessionError> {
        self.play_random(dir, input, out)
    }

    /// Skip to the previous track. Same resolution as
    /// [`skip_next`](Self::skip_next): a random pick.
    pub fn skip_previous<R: BufRead, W: Write>(
        &mut self,
        dir: &Path,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), SessionError> {
        self.play_random(dir, input, out)
    }

    /// Resolve a random pick for the interaction loop, reporting an
    /// empty catalog.
    fn next_random<W: Write>(
        &self,
        dir: &Path,
        out: &mut W,
    ) -> Result<Option<Track>, SessionError> {
        let pick = library::pick_random(dir, &self.library);
        if pick.is_none() {
            writeln!(out, "No MP3 files found in the directory.")?;
        }
        Ok(pick)
    }
}
