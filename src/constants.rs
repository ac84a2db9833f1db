//! Application-wide constants for busboard.
//!
//! This module centralizes all magic numbers and fixed paths to improve
//! maintainability and discoverability. Constants are grouped by domain
//! with documentation explaining their purpose.

use std::time::Duration;

// ============================================================================
// Recovery
// ============================================================================

/// Delay between connection loss and a full session rebuild.
///
/// When the feed connection closes, the client does not reconnect in place.
/// It waits this long, then discards the entire session (connection,
/// reconciler, rendered state) and rebuilds from scratch. The delay matches
/// the reload timer of the original display page.
pub const RELOAD_DELAY: Duration = Duration::from_millis(5000);

// ============================================================================
// Endpoints
// ============================================================================

/// Path of the live-update WebSocket endpoint on the feed server.
pub const FEED_PATH: &str = "/ws";

/// Path prefix of the display-image endpoint. The envelope identifier is
/// appended verbatim: `/qr/{id}`.
pub const QR_PATH_PREFIX: &str = "/qr/";

/// Default feed server base URL (the upstream server's default bind).
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

// ============================================================================
// UI
// ============================================================================

/// TUI frame rate delay (approximately 60fps).
///
/// Controls how often the TUI redraws and polls for input. 16ms gives
/// roughly 60fps, which is smooth without excessive CPU usage.
pub const FRAME_RATE_DELAY: Duration = Duration::from_millis(16);

/// Strftime format for the "last updated" stamp on the status line.
pub const LAST_UPDATED_FORMAT: &str = "%H:%M:%S";

/// Percentage of screen width for the arrivals panel.
pub const ARRIVALS_WIDTH_PERCENT: u16 = 55;

/// Percentage of screen width for the scannable-code panel.
pub const QR_WIDTH_PERCENT: u16 = 45;
