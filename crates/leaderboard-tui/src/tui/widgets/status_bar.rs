// Status bar widget: competition title, auth indicator, refresh marker.

use leaderboard_core::auth::AuthState;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [title] | [auth indicator] [refreshing marker] [last message]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        format!(" {} ", state.title),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));

    let (dot, label, color) = auth_indicator(&state.auth);
    spans.push(Span::styled(format!("{dot} "), Style::default().fg(color)));
    spans.push(Span::styled(label, Style::default().fg(Color::White)));

    if state.refreshing {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            "Refreshing...",
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(ref msg) = state.status_message {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Gray)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Dot, label and color for the cookie state.
pub fn auth_indicator(auth: &AuthState) -> (&'static str, &'static str, Color) {
    match auth {
        AuthState::Checking => ("●", "Checking cookies", Color::Yellow),
        AuthState::Valid { .. } => ("●", "Authenticated", Color::Green),
        AuthState::Invalid { .. } => ("●", "Cookies required", Color::Red),
        AuthState::Error { .. } => ("●", "Backend unreachable", Color::Red),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
