//! Live-update feed client.
//!
//! [`FeedClient`] owns the one WebSocket subscription and its
//! [`ConnectionState`]. Inbound text frames are decoded and handed to the
//! session's [`Reconciler`]; everything else on the socket is plumbing
//! (pings, stray binary frames, close).
//!
//! # Recovery
//!
//! Connection loss is never repaired in place. The state machine is
//! `Connecting → Open → Closed`, and `Closed` is terminal for that
//! session: after a fixed delay the client discards the whole session —
//! connection, reconciler, rendered state — and rebuilds all of it from
//! scratch, exactly like the original display page reloading itself.
//! Transport errors short of closure are logged and change nothing.
//!
//! The view layer observes the client through two `watch` channels: one
//! for the connection state, one for the current session's shared
//! [`UiState`] handle (a rebuilt session swaps in a fresh, empty state).

// Rust guideline compliant 2026-02

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;

use crate::codec;
use crate::constants::RELOAD_DELAY;
use crate::reconcile::{Reconciler, UiState};
use crate::ws::{self, WsMessage};

/// Lifecycle state of the feed subscription.
///
/// Exactly one of these exists per client; `Closed` never transitions
/// back to `Open` in place (a fresh session starts over at `Connecting`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake in progress (or about to start).
    #[default]
    Connecting,
    /// Subscription established; frames are flowing.
    Open,
    /// Connection lost; a session rebuild is pending.
    Closed,
}

impl ConnectionState {
    /// Human-readable name for the status line.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "live",
            ConnectionState::Closed => "disconnected",
        }
    }
}

/// Handle for observing a [`FeedClient`] from the view layer.
///
/// Cheap to clone; all fields are read-only watch receivers.
#[derive(Clone, Debug)]
pub struct FeedWatch {
    /// Latest connection state.
    pub state: watch::Receiver<ConnectionState>,
    /// Shared state of the current session. Replaced wholesale when a
    /// session is rebuilt.
    pub ui: watch::Receiver<Arc<Mutex<UiState>>>,
}

/// The live-update client: one logical subscription, rebuilt after loss.
#[derive(Debug)]
pub struct FeedClient {
    /// Full WebSocket endpoint URL (`ws://host/ws`).
    url: String,
    /// Delay between closure and session rebuild. Production always uses
    /// [`RELOAD_DELAY`]; tests inject shorter values.
    reload_delay: Duration,
    state_tx: watch::Sender<ConnectionState>,
    ui_tx: watch::Sender<Arc<Mutex<UiState>>>,
}

impl FeedClient {
    /// Creates a client for the given feed server base URL
    /// (`http://host:port`; the `/ws` path and WS scheme are derived).
    #[must_use]
    pub fn new(server_url: &str) -> Self {
        Self::with_reload_delay(server_url, RELOAD_DELAY)
    }

    /// Creates a client with a custom rebuild delay. Test seam only; the
    /// observable policy is the fixed [`RELOAD_DELAY`].
    #[must_use]
    pub fn with_reload_delay(server_url: &str, reload_delay: Duration) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Connecting);
        let (ui_tx, _) = watch::channel(Arc::new(Mutex::new(UiState::default())));
        Self {
            url: ws::feed_url(server_url),
            reload_delay,
            state_tx,
            ui_tx,
        }
    }

    /// Returns observation handles for the view layer.
    #[must_use]
    pub fn watch(&self) -> FeedWatch {
        FeedWatch {
            state: self.state_tx.subscribe(),
            ui: self.ui_tx.subscribe(),
        }
    }

    /// The resolved WebSocket endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Runs the subscription forever: one session at a time, each ending
    /// in `Closed`, followed by the reload delay and a full rebuild.
    ///
    /// Never returns; stop it by dropping the task. There is deliberately
    /// no way to abort a pending rebuild once a session has closed.
    pub async fn run(&self) {
        loop {
            // Fresh session: new reconciler, empty rendered state.
            let reconciler = Reconciler::new();
            self.ui_tx.send_replace(reconciler.ui());

            match self.session(&reconciler).await {
                Ok(()) => log::info!("feed connection closed"),
                Err(e) => log::error!("feed session failed: {e:#}"),
            }

            self.state_tx.send_replace(ConnectionState::Closed);
            log::info!(
                "rebuilding session in {}ms",
                self.reload_delay.as_millis()
            );
            tokio::time::sleep(self.reload_delay).await;
        }
    }

    /// Runs one session: connect, then pump messages until closure.
    ///
    /// Returns `Ok(())` on orderly closure (close frame or EOF) and an
    /// error if the handshake fails. Either way the caller treats the
    /// session as closed.
    async fn session(&self, reconciler: &Reconciler) -> Result<()> {
        self.state_tx.send_replace(ConnectionState::Connecting);
        log::info!("connecting to {}", self.url);

        let (mut writer, mut reader) = ws::connect(&self.url).await?;
        self.state_tx.send_replace(ConnectionState::Open);
        log::info!("feed subscription open");

        while let Some(message) = reader.recv().await {
            match message {
                Ok(WsMessage::Text(frame)) => apply_frame(reconciler, &frame),
                Ok(WsMessage::Ping(data)) => {
                    if let Err(e) = writer.send_pong(data).await {
                        log::warn!("pong failed: {e:#}");
                    }
                }
                Ok(WsMessage::Pong(_)) => {}
                Ok(WsMessage::Binary(data)) => {
                    log::debug!("ignoring unexpected binary frame ({} bytes)", data.len());
                }
                Ok(WsMessage::Close { code, reason }) => {
                    log::info!("close frame received (code {code}, reason {reason:?})");
                    return Ok(());
                }
                Err(e) => {
                    // Transport errors are log-only; the session stays in
                    // its current state until the stream actually ends.
                    log::error!("feed transport error: {e:#}");
                }
            }
        }

        Ok(())
    }
}

/// Decodes one inbound frame and applies it to the reconciler.
///
/// Malformed frames are discarded with a warning; the previous render
/// stays in place.
fn apply_frame(reconciler: &Reconciler, raw: &str) {
    match codec::decode_frame(raw) {
        Ok((id, snapshot)) => {
            log::debug!(
                "snapshot for stop {} ({} arrivals, id {})",
                snapshot.stop_id,
                snapshot.arrivals.len(),
                id
            );
            reconciler.render(&snapshot, &id);
        }
        Err(e) => log::warn!("discarding frame: {e}"),
    }
}
