//! TUI runner: the draw/input loop on the display thread.
//!
//! The runner owns the ratatui terminal and a [`FeedWatch`]; the feed
//! client runs on the tokio runtime and publishes state through watch
//! channels, so the two sides never share locks beyond the `UiState`
//! mutex (one writer: the reconciler; one reader: this loop).
//!
//! The `B` type parameter is the ratatui backend. Production uses
//! `CrosstermBackend<Stdout>`; tests use `TestBackend`.

// Rust guideline compliant 2026-02

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::constants::FRAME_RATE_DELAY;
use crate::feed::FeedWatch;

use super::view;

/// Owns the terminal and renders the latest reconciled state each frame.
#[derive(Debug)]
pub struct TuiRunner<B: Backend> {
    terminal: Terminal<B>,
    watch: FeedWatch,
    server_url: String,
}

impl<B: Backend> TuiRunner<B>
where
    B::Error: Send + Sync + 'static,
{
    /// Creates a runner over an initialized terminal.
    pub fn new(terminal: Terminal<B>, watch: FeedWatch, server_url: String) -> Self {
        Self {
            terminal,
            watch,
            server_url,
        }
    }

    /// Runs the draw/input loop until the user quits.
    ///
    /// Each iteration draws the latest state, then waits up to one frame
    /// delay for keyboard input. `q`, `Esc`, and `Ctrl-C` quit.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.draw()?;

            if event::poll(FRAME_RATE_DELAY)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && is_quit_key(key.code, key.modifiers) {
                        log::info!("quit requested");
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Draws one frame from the current watch values.
    pub fn draw(&mut self) -> Result<()> {
        let state = *self.watch.state.borrow();
        let ui_handle = std::sync::Arc::clone(&self.watch.ui.borrow());
        // Snapshot the state out of the mutex so the reconciler is never
        // blocked for the duration of a draw.
        let ui = match ui_handle.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        self.terminal
            .draw(|frame| view::render(frame, &ui, state, &self.server_url))?;
        Ok(())
    }
}

/// Quit bindings: `q`/`Q`, `Esc`, `Ctrl-C`.
fn is_quit_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}
