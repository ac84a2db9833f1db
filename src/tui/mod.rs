//! Terminal user interface for the busboard display.
//!
//! - [`runner`] - draw/input loop, generic over the ratatui backend
//! - [`view`] - rendering of the reconciled state
//! - [`qr`] - half-block QR rendering for the scannable-code pane
//! - [`guard`] - RAII terminal restore

pub mod guard;
pub mod qr;
pub mod runner;
pub mod view;

pub use guard::TerminalGuard;
pub use runner::TuiRunner;
