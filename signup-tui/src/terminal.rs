//! Terminal setup and teardown with panic safety.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use crate::view::{Line, Tone};

/// A wrapper around stdout that restores the terminal on drop.
pub struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    /// Initialize the terminal for TUI rendering.
    pub fn new() -> io::Result<Self> {
        // Restore the terminal before the default hook prints the panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;

        Ok(Self { stdout })
    }

    /// Draws `lines` from the top-left corner, replacing the previous frame.
    pub fn draw(&mut self, lines: &[Line]) -> io::Result<()> {
        for (row, line) in lines.iter().enumerate() {
            let row = u16::try_from(row + 1).unwrap_or(u16::MAX);
            queue!(self.stdout, MoveTo(2, row))?;
            for span in &line.spans {
                apply_tone(&mut self.stdout, span.tone)?;
                queue!(
                    self.stdout,
                    Print(&span.text),
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )?;
            }
            queue!(self.stdout, Clear(ClearType::UntilNewLine))?;
        }
        queue!(self.stdout, Clear(ClearType::FromCursorDown))?;
        self.stdout.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn apply_tone(out: &mut Stdout, tone: Tone) -> io::Result<()> {
    match tone {
        Tone::Normal => Ok(()),
        Tone::Title => queue!(
            out,
            SetAttribute(Attribute::Bold),
            SetForegroundColor(Color::Cyan)
        ),
        Tone::Muted | Tone::Disabled => queue!(out, SetForegroundColor(Color::DarkGrey)),
        Tone::Focused => queue!(out, SetForegroundColor(Color::Cyan)),
        Tone::Error => queue!(out, SetForegroundColor(Color::Red)),
        Tone::Success => queue!(out, SetForegroundColor(Color::Green)),
        Tone::Cursor => queue!(out, SetAttribute(Attribute::Reverse)),
    }
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}
