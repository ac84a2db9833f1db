//! View layer: renders the reconciled [`UiState`] with ratatui.
//!
//! Pure function of its inputs — the view never mutates the rendered
//! state, it only draws the latest snapshot the reconciler produced.

// Rust guideline compliant 2026-02

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::constants::{ARRIVALS_WIDTH_PERCENT, QR_WIDTH_PERCENT};
use crate::feed::ConnectionState;
use crate::reconcile::UiState;

use super::qr::generate_qr_code_lines;

/// Draws one full frame: arrivals table, scannable-code pane, status line.
///
/// `server_url` is the feed server's base URL, used to absolutize the
/// display-image path for the scannable code.
pub fn render(frame: &mut Frame, ui: &UiState, state: ConnectionState, server_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(frame.area());

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(ARRIVALS_WIDTH_PERCENT),
            Constraint::Percentage(QR_WIDTH_PERCENT),
        ])
        .split(chunks[0]);

    render_arrivals(frame, ui, panels[0]);
    render_scannable_code(frame, ui, server_url, panels[1]);
    render_status_line(frame, ui, state, chunks[1]);
}

/// Arrivals table with the stop identifier in the panel title.
fn render_arrivals(frame: &mut Frame, ui: &UiState, area: Rect) {
    let title = if ui.stop_label.is_empty() {
        "Stop".to_string()
    } else {
        format!("Stop {}", ui.stop_label)
    };

    let rows = ui.rows.iter().map(|row| {
        Row::new(vec![format!("Bus {}", row.line), row.eta.clone()])
    });

    let table = Table::new(
        rows,
        [Constraint::Percentage(40), Constraint::Percentage(60)],
    )
    .header(
        Row::new(vec!["Line", "Arrives in"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

/// Scannable-code pane: a terminal QR of the display-image URL.
fn render_scannable_code(frame: &mut Frame, ui: &UiState, server_url: &str, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Scan me");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if ui.image_url.is_empty() {
        let placeholder = Paragraph::new("waiting for feed...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(placeholder, inner);
        return;
    }

    let url = format!("{}{}", server_url.trim_end_matches('/'), ui.image_url);
    let lines: Vec<Line> = generate_qr_code_lines(&url, inner.width, inner.height)
        .into_iter()
        .map(Line::from)
        .collect();
    let code = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(code, inner);
}

/// Status line: connection state, last-updated stamp, quit hint.
fn render_status_line(frame: &mut Frame, ui: &UiState, state: ConnectionState, area: Rect) {
    let state_style = match state {
        ConnectionState::Open => Style::default().fg(Color::Green),
        ConnectionState::Connecting => Style::default().fg(Color::Yellow),
        ConnectionState::Closed => Style::default().fg(Color::Red),
    };

    let mut spans = vec![Span::styled(state.display_name(), state_style)];
    if let Some(stamp) = &ui.last_updated {
        spans.push(Span::raw(format!("  Last updated: {stamp}")));
    }
    spans.push(Span::styled(
        "  [q] quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::ArrivalRow;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_text(ui: &UiState, state: ConnectionState) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, ui, state, "http://localhost:8080"))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buffer.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    fn populated_state() -> UiState {
        UiState {
            stop_label: "4521".to_string(),
            rows: vec![
                ArrivalRow {
                    line: "42".to_string(),
                    eta: "Almost there!".to_string(),
                },
                ArrivalRow {
                    line: "7".to_string(),
                    eta: "1 min".to_string(),
                },
            ],
            image_url: "/qr/abc123".to_string(),
            last_updated: Some("12:03:44".to_string()),
        }
    }

    #[test]
    fn test_render_shows_stop_and_rows() {
        let text = render_to_text(&populated_state(), ConnectionState::Open);
        assert!(text.contains("Stop 4521"));
        assert!(text.contains("Bus 42"));
        assert!(text.contains("Almost there!"));
        assert!(text.contains("Bus 7"));
        assert!(text.contains("1 min"));
    }

    #[test]
    fn test_render_shows_status_line() {
        let text = render_to_text(&populated_state(), ConnectionState::Open);
        assert!(text.contains("live"));
        assert!(text.contains("Last updated: 12:03:44"));
    }

    #[test]
    fn test_render_empty_state_shows_placeholder() {
        let text = render_to_text(&UiState::default(), ConnectionState::Connecting);
        assert!(text.contains("waiting for feed..."));
        assert!(text.contains("connecting"));
    }

    #[test]
    fn test_render_draws_code_when_image_url_set() {
        let text = render_to_text(&populated_state(), ConnectionState::Open);
        assert!(text.contains('█') || text.contains('▀') || text.contains('▄'));
    }

    #[test]
    fn test_render_disconnected_status() {
        let text = render_to_text(&populated_state(), ConnectionState::Closed);
        assert!(text.contains("disconnected"));
    }
}
