//! Terminal state guard for RAII cleanup.
//!
//! Ensures terminal state is properly restored even if the application
//! panics while the TUI is active.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};

/// Guard struct that ensures terminal cleanup on drop (including panics).
///
/// When dropped, this guard:
/// - Disables raw mode
/// - Leaves alternate screen
/// - Shows the cursor
#[derive(Debug, Default)]
pub struct TerminalGuard;

impl TerminalGuard {
    /// Creates a new terminal guard.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Always attempt to restore terminal state, ignoring errors
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = execute!(std::io::stdout(), crossterm::cursor::Show);
    }
}
