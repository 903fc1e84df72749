//! Runtime wiring: configuration, startup prompts and the menu loop.

use std::io;

use crate::audio::AudioPlayer;
use crate::session::{Session, SessionState};

mod event_loop;
mod settings;
mod startup;

/// Run the player: load configuration, resolve the music directory,
/// open the audio device and hand control to the menu loop. The
/// configuration is written back on clean exit.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    startup::select_music_directory(&mut settings, &mut input, &mut out)?;

    let engine = AudioPlayer::new()?;
    let state = SessionState::new(&settings.playback);
    let mut session = Session::new(engine, state, settings.library.clone());

    event_loop::run(&mut session, &settings, &mut input, &mut out)?;

    // A crash or interrupt skips this write, losing a directory chosen
    // this session; acceptable for a single small setting.
    if let Err(e) = settings.save() {
        eprintln!("vivace: failed to save config: {e}");
    }

    Ok(())
}
