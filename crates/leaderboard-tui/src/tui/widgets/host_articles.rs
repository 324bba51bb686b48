// Host articles widget: informational, unranked list of the organizer's posts.

use leaderboard_core::view::{author_label, host_toggle_label};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(vec!["Title", "Author", "Likes", "Comments"]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .host_articles
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::from(a.title.clone()),
                Cell::from(author_label(a).to_string()),
                Cell::from(a.likes_count.to_string()),
                Cell::from(a.comments_count.to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(10),
    ];

    let title = format!(
        " Host Articles (h: {}) ",
        host_toggle_label(state.host_articles.len(), state.show_host)
    );
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(title),
    );
    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
