//! Console rendering and line-input helpers.
//!
//! The shell is a cleared-screen numbered menu over plain line input.
//! Everything here writes to a generic `Write` and reads from a generic
//! `BufRead` so the whole interaction can run against buffers in tests.

use std::io::{self, BufRead, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

/// Clear the terminal and park the cursor at the top-left corner.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Draw the main menu, headed by the current loop flag.
pub fn draw_menu<W: Write>(out: &mut W, loop_enabled: bool) -> io::Result<()> {
    writeln!(out, "Toggle State :  {loop_enabled}")?;
    writeln!(out)?;
    writeln!(out, "1. Select and play specific song")?;
    writeln!(out, "2. Toggle loop status")?;
    writeln!(out, "3. Change volume")?;
    writeln!(out, "4. Skip to next song")?;
    writeln!(out, "5. Skip to previous song")?;
    writeln!(out, "6. Exit")?;
    prompt(out, "Enter your choice: ")
}

/// Print `msg` without a trailing newline and flush, so the user sees it
/// before the blocking read that follows.
pub fn prompt<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    write!(out, "{msg}")?;
    out.flush()
}

/// Read one line of input, stripped of its line ending.
/// Returns `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}
