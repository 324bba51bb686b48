// Footer widget: backend totals, last scrape time, host toggle hint.

use leaderboard_core::model::Stats;
use leaderboard_core::view::host_toggle_label;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        format!(" {}", totals_text(state.stats.as_ref())),
        Style::default().fg(Color::White),
    )];

    if let Some(stats) = &state.stats {
        if let Some(updated) = stats.last_updated {
            spans.push(Span::styled(
                format!(" • Updated {} UTC", updated.format("%Y-%m-%d %H:%M")),
                Style::default().fg(Color::Gray),
            ));
        }
        if stats.is_updating {
            spans.push(Span::styled(
                " • Backend updating...",
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    if !state.host_articles.is_empty() && !state.show_host {
        spans.push(Span::styled(
            format!(" • h: {}", host_toggle_label(state.host_articles.len(), false)),
            Style::default().fg(Color::Blue),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// `Total: X articles • Y likes • Z comments`, straight from the backend.
pub fn totals_text(stats: Option<&Stats>) -> String {
    match stats {
        Some(s) => format!(
            "Total: {} articles • {} likes • {} comments",
            s.total_articles, s.total_likes, s.total_comments
        ),
        None => "Total: —".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_util::{article, buffer_lines, stats};
    use chrono::NaiveDate;

    fn draw(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(120, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        buffer_lines(terminal.backend().buffer()).remove(0)
    }

    #[test]
    fn totals_come_from_stats() {
        assert_eq!(
            totals_text(Some(&stats(42, 1234, 56))),
            "Total: 42 articles • 1234 likes • 56 comments"
        );
        assert_eq!(totals_text(None), "Total: —");
    }

    #[test]
    fn shows_last_update_and_updating_marker() {
        let mut state = ViewState::new("t");
        let mut s = stats(1, 2, 3);
        s.last_updated = NaiveDate::from_ymd_opt(2025, 11, 20)
            .and_then(|d| d.and_hms_opt(14, 3, 0));
        s.is_updating = true;
        state.stats = Some(s);

        let line = draw(&state);
        assert!(line.contains("Updated 2025-11-20 14:03 UTC"));
        assert!(line.contains("Backend updating..."));
    }

    #[test]
    fn host_hint_only_when_hidden_and_present() {
        let mut state = ViewState::new("t");
        state.stats = Some(stats(1, 1, 1));
        assert!(!draw(&state).contains("host article"));

        state.host_articles = vec![article("h", "Host", Some("Ben Fowler"), 1, 1, 1.0)];
        assert!(draw(&state).contains("h: Show 1 host article"));

        state.show_host = true;
        assert!(!draw(&state).contains("Show 1 host article"));
    }
}
