use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::Settings;
use crate::ui;

/// Prompt for the music directory when none is configured yet.
///
/// Invalid paths re-prompt indefinitely; an explicit loop rather than
/// recursion, so a stubborn session cannot grow the stack. End of input
/// leaves the directory unset.
pub fn select_music_directory<R: BufRead, W: Write>(
    settings: &mut Settings,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    if !settings.music_dir.is_empty() {
        return Ok(());
    }

    loop {
        ui::prompt(out, "Enter the path to your music directory: ")?;
        let Some(line) = ui::read_line(input)? else {
            return Ok(());
        };

        let dir = line.trim();
        if !dir.is_empty() && Path::new(dir).is_dir() {
            settings.music_dir = dir.to_string();
            return Ok(());
        }
        writeln!(out, "Invalid directory path. Please try again.")?;
    }
}
