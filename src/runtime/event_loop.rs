//! The menu loop: one choice read per iteration, dispatched to the
//! session. All user-facing errors recover back to the menu; only a
//! dead console terminates the loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::audio::PlaybackEngine;
use crate::config::Settings;
use crate::session::{Session, SessionError};
use crate::ui;

pub fn run<E: PlaybackEngine, R: BufRead, W: Write>(
    session: &mut Session<E>,
    settings: &Settings,
    input: &mut R,
    out: &mut W,
) -> Result<(), SessionError> {
    let dir = PathBuf::from(&settings.music_dir);

    loop {
        ui::clear_screen(out)?;
        ui::draw_menu(out, session.state.loop_enabled)?;

        let Some(choice) = ui::read_line(input)? else {
            break;
        };

        let result = match choice.trim() {
            "1" => session.play_selected(&dir, input, out),
            "2" => session.toggle_loop(out),
            "3" => session.change_volume(input, out),
            "4" => session.skip_next(&dir, input, out),
            "5" => session.skip_previous(&dir, input, out),
            "6" => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            _ => {
                writeln!(out, "Invalid choice. Please enter a number between 1 and 6.")?;
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            // An unplayable file must not take the whole player down.
            Err(SessionError::Audio(e)) => writeln!(out, "Playback error: {e}")?,
            Err(e @ SessionError::Io(_)) => return Err(e),
        }
    }

    Ok(())
}
