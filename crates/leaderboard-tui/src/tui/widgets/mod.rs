// TUI widget modules for each dashboard panel.

pub mod cookie_modal;
pub mod footer;
pub mod gate;
pub mod host_articles;
pub mod leaderboard;
pub mod status_bar;
pub mod your_submission;
