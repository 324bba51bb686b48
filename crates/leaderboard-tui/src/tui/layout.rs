// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into zones for the leaderboard dashboard:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Your Submission (5 rows, only when matched)       |
// +--------------------------------------------------+
// | Leaderboard table (fill)                          |
// +--------------------------------------------------+
// | Detail line (1 row): selected article URL         |
// +--------------------------------------------------+
// | Host articles (only while shown, every row fits)  |
// +--------------------------------------------------+
// | Footer (1 row): totals, last update               |
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// Zones that are not displayed get a zero-height rect.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the your-submission panel, borders included.
pub const SUBMISSION_HEIGHT: u16 = 5;

/// The leaderboard never shrinks below this, whatever the host list needs.
pub const MIN_LEADERBOARD_HEIGHT: u16 = 4;

/// Status bar, detail line, footer and help bar.
const FIXED_ROWS: u16 = 4;

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: competition title, auth indicator, refresh marker.
    pub status_bar: Rect,
    /// Highlighted summary of the user's own article.
    pub your_submission: Rect,
    /// Ranked table of all non-host submissions.
    pub leaderboard: Rect,
    /// URL of the selected row.
    pub detail: Rect,
    pub host_articles: Rect,
    /// Aggregate totals and last-updated time.
    pub footer: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Which optional zones are visible in this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sections {
    pub your_submission: bool,
    /// Number of host rows to fit, `None` when the section is hidden.
    pub host_rows: Option<usize>,
}

/// Height of the host section for `rows` table rows: borders, header, rows.
pub fn host_height(rows: usize) -> u16 {
    let rows = u16::try_from(rows).unwrap_or(u16::MAX);
    rows.saturating_add(3)
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect, sections: Sections) -> AppLayout {
    let submission_height = if sections.your_submission {
        SUBMISSION_HEIGHT
    } else {
        0
    };
    // The host section takes what it needs from whatever the leaderboard
    // can spare; only a short terminal cuts it down.
    let spare = area
        .height
        .saturating_sub(FIXED_ROWS + submission_height + MIN_LEADERBOARD_HEIGHT);
    let host = sections
        .host_rows
        .map(|rows| host_height(rows).min(spare))
        .unwrap_or(0);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                   // status bar
            Constraint::Length(submission_height),   // your submission
            Constraint::Min(MIN_LEADERBOARD_HEIGHT), // leaderboard
            Constraint::Length(1),                   // detail line
            Constraint::Length(host),                // host articles
            Constraint::Length(1),                   // footer
            Constraint::Length(1),                   // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        your_submission: vertical[1],
        leaderboard: vertical[2],
        detail: vertical[3],
        host_articles: vertical[4],
        footer: vertical[5],
        help_bar: vertical[6],
    }
}

/// Split used by the non-dashboard views: status bar, body, help bar.
pub fn build_simple_layout(area: Rect) -> (Rect, Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    (vertical[0], vertical[1], vertical[2])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
