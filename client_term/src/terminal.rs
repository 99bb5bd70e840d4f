//! Raw-mode terminal session

use crate::error::TerminalError;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use std::io::stdout;
use tracing::debug;

pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 15;

pub fn check_size(cols: u16, rows: u16) -> Result<(), TerminalError> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(TerminalError::TooSmall {
            cols,
            rows,
            min_cols: MIN_COLS,
            min_rows: MIN_ROWS,
        });
    }
    Ok(())
}

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
/// Dropping it puts the terminal back, on error paths too.
pub struct TerminalGuard {
    enhanced_keys: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self, TerminalError> {
        let (cols, rows) = terminal::size()?;
        check_size(cols, rows)?;

        terminal::enable_raw_mode()?;
        let mut guard = Self {
            enhanced_keys: false,
        };
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            terminal::SetTitle("Pong"),
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;

        // Key release events; terminals without the protocol ignore this
        match execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        ) {
            Ok(()) => guard.enhanced_keys = true,
            Err(err) => debug!(%err, "keyboard enhancement unavailable"),
        }

        debug!(cols, rows, "terminal ready");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.enhanced_keys {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
