// Full-body views shown instead of the dashboard: initial loading,
// authentication required, and the blocking fetch error.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::ViewState;

pub const AUTH_REQUIRED: &str = "Authentication required. Please upload session cookies.";

pub fn render_loading(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(vec![
        Line::raw(""),
        Line::styled("Loading leaderboard...", Style::default().fg(Color::Yellow)),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Gate view: cookies missing, expired, or the backend unreachable.
pub fn render_auth_required(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines = vec![
        Line::raw(""),
        Line::styled(
            AUTH_REQUIRED,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(message) = state.auth.message() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            message.to_string(),
            Style::default().fg(Color::Gray),
        ));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled(
            "u",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to upload cookies exported from your browser."),
    ]));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Authentication "),
        );
    frame.render_widget(paragraph, area);
}

/// Blocking error view for a failed refresh cycle.
pub fn render_error(frame: &mut Frame, area: Rect, state: &ViewState) {
    let message = state.error.as_deref().unwrap_or_default();
    let paragraph = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(message.to_string(), Style::default().fg(Color::Red)),
        Line::raw(""),
        Line::styled(
            "r: retry   Esc: show previous data",
            Style::default().fg(Color::Gray),
        ),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(Span::styled(
                " Error ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_util::buffer_lines;
    use leaderboard_core::auth::AuthState;

    fn draw(f: impl FnOnce(&mut Frame)) -> Vec<String> {
        let backend = ratatui::backend::TestBackend::new(90, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(f).unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    #[test]
    fn auth_required_without_message() {
        let mut state = ViewState::new("t");
        state.auth = AuthState::Invalid {
            status: "invalid".into(),
            message: None,
        };
        let lines = draw(|frame| render_auth_required(frame, frame.area(), &state));
        assert!(lines.iter().any(|l| l.contains(AUTH_REQUIRED)));
        assert!(lines.iter().any(|l| l.contains("to upload cookies")));
    }

    #[test]
    fn auth_required_shows_unreachable_message() {
        let mut state = ViewState::new("t");
        state.auth = AuthState::Error {
            message: "Cannot connect to backend".into(),
        };
        let lines = draw(|frame| render_auth_required(frame, frame.area(), &state));
        assert!(lines.iter().any(|l| l.contains("Cannot connect to backend")));
    }

    #[test]
    fn error_view_shows_text() {
        let mut state = ViewState::new("t");
        state.error = Some("Failed to trigger refresh: request failed".into());
        let lines = draw(|frame| render_error(frame, frame.area(), &state));
        assert!(lines
            .iter()
            .any(|l| l.contains("Failed to trigger refresh: request failed")));
    }

    #[test]
    fn loading_does_not_panic_on_tiny_area() {
        let backend = ratatui::backend::TestBackend::new(5, 2);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_loading(frame, frame.area()))
            .unwrap();
    }
}
