// Leaderboard widget: ranked table of all non-host submissions.
//
// Rows follow the active sort key; the Rank column always shows the
// backend rank. The user's own article carries a YOU badge and a highlight.

use leaderboard_core::view::{self, author_label, format_score, is_yours, SortKey};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the leaderboard table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let yours = state.your_submission.as_ref();
    let rows_in_order = view::sorted(&state.leaderboard, state.sort_key);
    let ranks = view::ranks(&state.leaderboard);

    let header = Row::new(header_labels(state.sort_key).into_iter().map(Cell::from)).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = rows_in_order
        .iter()
        .map(|a| {
            let rank = ranks
                .get(a.content_id.as_str())
                .map(|r| format!("#{r}"))
                .unwrap_or_default();

            let mine = is_yours(a, yours);
            let title = if mine {
                Line::from(vec![
                    Span::raw(a.title.clone()),
                    Span::raw(" "),
                    Span::styled(
                        "YOU",
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::raw(a.title.clone())
            };

            let style = if mine {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(rank),
                Cell::from(title),
                Cell::from(author_label(a).to_string()),
                Cell::from(a.likes_count.to_string()),
                Cell::from(a.comments_count.to_string()),
                Cell::from(format_score(a.engagement_score)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title(state.leaderboard.len())),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut table_state = TableState::default();
    if !state.leaderboard.is_empty() {
        table_state.select(Some(state.selected));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// One-line detail for the selected row: its link, or `no link`.
pub fn render_detail(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = match state.selected_article() {
        Some(article) => {
            let link = article.article_url.as_deref().unwrap_or("no link");
            Line::from(vec![
                Span::styled(" Link: ", Style::default().fg(Color::Gray)),
                Span::styled(link.to_string(), Style::default().fg(Color::Cyan)),
            ])
        }
        None => Line::raw(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

pub fn title(count: usize) -> String {
    format!(" Competition Leaderboard ({count} submissions) ")
}

/// Column headers; the active sort column gets a `↓`.
pub fn header_labels(sort_key: SortKey) -> Vec<String> {
    let sortable = |key: SortKey| {
        if key == sort_key {
            format!("{} ↓", key.label())
        } else {
            key.label().to_string()
        }
    };
    vec![
        "Rank".to_string(),
        "Title".to_string(),
        "Author".to_string(),
        sortable(SortKey::Likes),
        sortable(SortKey::Comments),
        sortable(SortKey::EngagementScore),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
