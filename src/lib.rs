//! Busboard - live display client for a single bus stop.
//!
//! Subscribes to a push feed of bus arrivals and keeps a terminal
//! dashboard synchronized with the latest server-pushed snapshot: an
//! arrivals table, a scannable code for the current display image, and a
//! last-updated stamp.
//!
//! # Architecture
//!
//! Data flows one way through three components:
//!
//! - **[`feed`]** - owns the WebSocket subscription and its connection
//!   state; rebuilds the whole session after connection loss
//! - **[`codec`]** - pure two-stage decoding of the wire envelope and its
//!   nested stop snapshot
//! - **[`reconcile`]** - turns a decoded snapshot into the visible state,
//!   replacing it wholesale each time
//!
//! The [`tui`] module renders the reconciled state; [`ws`] wraps the raw
//! WebSocket transport.

// Library modules
pub mod codec;
pub mod config;
pub mod constants;
pub mod feed;
pub mod reconcile;
pub mod tui;
pub mod ws;

// Re-export commonly used types
pub use codec::{Arrival, DecodeError, SnapshotEnvelope, StopSnapshot};
pub use config::Config;
pub use feed::{ConnectionState, FeedClient, FeedWatch};
pub use reconcile::{Reconciler, UiState};
