// Your-submission panel: rank, engagement and link of the user's article.
//
// Only rendered when both the submission and the stats are known; the
// layout gives it no space otherwise.

use leaderboard_core::model::{Article, Stats};
use leaderboard_core::view::{self, format_score};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (Some(yours), Some(stats)) = (&state.your_submission, &state.stats) else {
        return;
    };

    let rank = view::rank_of(&state.leaderboard, &yours.content_id);
    let lines = vec![
        summary_line(rank, stats, yours),
        Line::styled(
            yours.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            yours.article_url.clone().unwrap_or_else(|| "no link".to_string()),
            Style::default().fg(Color::Cyan),
        ),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Your Submission "),
    );
    frame.render_widget(paragraph, area);
}

/// `#r / total` followed by likes, comments and score.
pub fn rank_label(rank: Option<usize>, stats: &Stats) -> String {
    match rank {
        Some(r) => format!("#{} / {}", r, stats.total_articles),
        None => format!("#- / {}", stats.total_articles),
    }
}

fn summary_line(rank: Option<usize>, stats: &Stats, yours: &Article) -> Line<'static> {
    let bold = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(rank_label(rank, stats), bold),
        Span::raw("   "),
        Span::styled(yours.likes_count.to_string(), bold),
        Span::raw(" likes   "),
        Span::styled(yours.comments_count.to_string(), bold),
        Span::raw(" comments   score "),
        Span::styled(format_score(yours.engagement_score), bold),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
