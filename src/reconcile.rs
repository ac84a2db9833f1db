//! State reconciliation: snapshot in, visible UI state out.
//!
//! The [`Reconciler`] is the single writer of the rendered state. Each
//! inbound snapshot replaces the previous one wholesale — there is no
//! diffing against what was shown before, no history, and no re-sorting.
//! The view layer only ever reads the resulting [`UiState`].

// Rust guideline compliant 2026-02

use std::sync::{Arc, Mutex};

use crate::codec::StopSnapshot;
use crate::constants::{LAST_UPDATED_FORMAT, QR_PATH_PREFIX};

/// One visible table row: a line label and its formatted arrival text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrivalRow {
    /// Line identifier, as received.
    pub line: String,
    /// Formatted time-to-arrival text (see [`arrival_label`]).
    pub eta: String,
}

/// Everything the view renders. Replaced as a whole on each update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    /// Displayed stop identifier.
    pub stop_label: String,
    /// Visible rows, in feed order.
    pub rows: Vec<ArrivalRow>,
    /// Display-image path for the current identifier (`/qr/{id}`).
    pub image_url: String,
    /// Local wall-clock time of the most recent render. `None` until the
    /// first snapshot arrives.
    pub last_updated: Option<String>,
}

/// Owns the rendered state and exposes `render` as its only mutator.
///
/// Constructed once per session and discarded with it; a rebuilt session
/// starts from an empty `UiState`. The state sits behind `Arc<Mutex<_>>`
/// so the draw loop can read it while the feed task writes — writes stay
/// serial because the feed task is the only caller of `render`.
#[derive(Debug, Default)]
pub struct Reconciler {
    ui: Arc<Mutex<UiState>>,
}

impl Reconciler {
    /// Creates a reconciler with empty initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a read handle on the rendered state for the view layer.
    #[must_use]
    pub fn ui(&self) -> Arc<Mutex<UiState>> {
        Arc::clone(&self.ui)
    }

    /// Applies a snapshot: replaces the stop label, the entire row set,
    /// and the display-image path, and stamps the current local time.
    ///
    /// Inputs are never mutated; rows appear in snapshot order with no
    /// deduplication.
    pub fn render(&self, snapshot: &StopSnapshot, identifier: &str) {
        let rows = snapshot
            .arrivals
            .iter()
            .map(|arrival| ArrivalRow {
                line: arrival.line.clone(),
                eta: arrival_label(arrival.minutes),
            })
            .collect();

        let stamp = chrono::Local::now()
            .format(LAST_UPDATED_FORMAT)
            .to_string();

        if let Ok(mut ui) = self.ui.lock() {
            ui.stop_label = snapshot.stop_id.clone();
            ui.rows = rows;
            ui.image_url = image_url(identifier);
            ui.last_updated = Some(stamp);
        }
    }
}

/// Formats a minutes-away value for display.
///
/// `0` is the "imminent/at stop" sentinel. The pluralization is exact:
/// `1 min`, otherwise `N mins`.
#[must_use]
pub fn arrival_label(minutes: u32) -> String {
    match minutes {
        0 => "Almost there!".to_string(),
        1 => "1 min".to_string(),
        n => format!("{n} mins"),
    }
}

/// Builds the display-image path from an envelope identifier, verbatim.
#[must_use]
pub fn image_url(identifier: &str) -> String {
    format!("{QR_PATH_PREFIX}{identifier}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_frame, Arrival};

    fn snapshot(stop_id: &str, arrivals: &[(&str, u32)]) -> StopSnapshot {
        StopSnapshot {
            stop_id: stop_id.to_string(),
            arrivals: arrivals
                .iter()
                .map(|&(line, minutes)| Arrival {
                    line: line.to_string(),
                    minutes,
                })
                .collect(),
        }
    }

    #[test]
    fn test_arrival_label_mapping_is_exact() {
        assert_eq!(arrival_label(0), "Almost there!");
        assert_eq!(arrival_label(1), "1 min");
        assert_eq!(arrival_label(2), "2 mins");
        assert_eq!(arrival_label(17), "17 mins");
    }

    #[test]
    fn test_image_url_template() {
        assert_eq!(image_url("abc123"), "/qr/abc123");
        assert_eq!(image_url("1717171717171"), "/qr/1717171717171");
    }

    #[test]
    fn test_render_row_count_matches_arrivals_in_order() {
        let reconciler = Reconciler::new();
        reconciler.render(&snapshot("4521", &[("42", 0), ("7", 1), ("7", 9)]), "x");

        let ui = reconciler.ui();
        let ui = ui.lock().unwrap();
        assert_eq!(ui.rows.len(), 3);
        let lines: Vec<&str> = ui.rows.iter().map(|r| r.line.as_str()).collect();
        assert_eq!(lines, vec!["42", "7", "7"]);
    }

    #[test]
    fn test_render_replaces_rows_never_appends() {
        let reconciler = Reconciler::new();
        reconciler.render(
            &snapshot("4521", &[("1", 2), ("2", 4), ("3", 6), ("4", 8)]),
            "a",
        );
        reconciler.render(&snapshot("4521", &[("5", 3)]), "b");

        let ui = reconciler.ui();
        let ui = ui.lock().unwrap();
        assert_eq!(ui.rows.len(), 1);
        assert_eq!(ui.rows[0].line, "5");
        assert_eq!(ui.rows[0].eta, "3 mins");
    }

    #[test]
    fn test_render_tracks_latest_identifier() {
        let reconciler = Reconciler::new();
        let empty = snapshot("4521", &[]);

        reconciler.render(&empty, "first");
        reconciler.render(&empty, "second");

        let ui = reconciler.ui();
        assert_eq!(ui.lock().unwrap().image_url, "/qr/second");
    }

    #[test]
    fn test_render_stamps_last_updated() {
        let reconciler = Reconciler::new();
        {
            let ui = reconciler.ui();
            assert!(ui.lock().unwrap().last_updated.is_none());
        }

        reconciler.render(&snapshot("4521", &[]), "x");

        let ui = reconciler.ui();
        assert!(ui.lock().unwrap().last_updated.is_some());
    }

    #[test]
    fn test_render_does_not_mutate_snapshot() {
        let reconciler = Reconciler::new();
        let original = snapshot("4521", &[("42", 0)]);
        let copy = original.clone();
        reconciler.render(&original, "x");
        assert_eq!(original, copy);
    }

    #[test]
    fn test_scenario_frame_end_to_end() {
        let raw = r#"{"id":"abc123","data":"{\"s\":\"4521\",\"b\":[{\"l\":\"42\",\"m\":0},{\"l\":\"7\",\"m\":1},{\"l\":\"7\",\"m\":9}]}"}"#;
        let (id, snapshot) = decode_frame(raw).unwrap();

        let reconciler = Reconciler::new();
        reconciler.render(&snapshot, &id);

        let ui = reconciler.ui();
        let ui = ui.lock().unwrap();
        assert_eq!(ui.stop_label, "4521");
        let etas: Vec<&str> = ui.rows.iter().map(|r| r.eta.as_str()).collect();
        assert_eq!(etas, vec!["Almost there!", "1 min", "9 mins"]);
        assert_eq!(ui.image_url, "/qr/abc123");
    }
}
