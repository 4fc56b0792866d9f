/// Terminal boundary — all terminal I/O lives here.
///
/// The simulation composes a complete `Screen` each frame; this module only
/// puts the terminal into game mode and copies that grid onto it.

use std::io::Write;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use console_invaders::screen::Screen;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STATUS: Color = Color::Yellow;
const C_FIELD: Color = Color::White;

// ── Terminal mode ─────────────────────────────────────────────────────────────

/// Raw mode + alternate screen for as long as the guard lives.
///
/// Dropping the guard always restores the terminal, even when the game loop
/// bails out with an error.
pub struct TerminalGuard<W: Write> {
    out: W,
    keyboard_enhanced: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(mut out: W) -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(terminal::Clear(terminal::ClearType::All))?;

        // Key-release events make held keys exact; terminals without the
        // kitty protocol fall back to the hold window in main.rs.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        log::debug!("keyboard enhancement: {}", keyboard_enhanced);

        Ok(Self { out, keyboard_enhanced })
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(style::ResetColor);
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Blit ──────────────────────────────────────────────────────────────────────

/// Copy the whole grid to the terminal, row by row.
pub fn blit<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    for (row, text) in screen.rows().enumerate() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        // Status line stands out from the playfield.
        let color = if row == 0 { C_STATUS } else { C_FIELD };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    out.queue(style::ResetColor)?;
    out.flush()
}
