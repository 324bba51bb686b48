// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the orchestrator's snapshot plus
// purely local concerns (sort key, selection, uploader fields). The
// orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream};
use crossterm::execute;
use futures_util::StreamExt;
use leaderboard_core::auth::AuthState;
use leaderboard_core::model::{Article, Stats};
use leaderboard_core::protocol::{AppSnapshot, UiUpdate, UserCommand};
use leaderboard_core::view::SortKey;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use layout::{build_layout, build_simple_layout, Sections};

// ---------------------------------------------------------------------------
// Cookie uploader state
// ---------------------------------------------------------------------------

/// Which input of the cookie uploader receives typed and pasted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploaderField {
    #[default]
    FilePath,
    Paste,
}

/// Last message shown inside the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(s) | Notice::Success(s) | Notice::Error(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploaderState {
    pub open: bool,
    pub focus: UploaderField,
    pub path_text: String,
    /// Staged paste text. Only cleared by a successful upload.
    pub paste_text: String,
    pub notice: Option<Notice>,
    /// An upload is in flight; Enter is ignored until it resolves.
    pub submitting: bool,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated via `UiUpdate` messages from the orchestrator. The
/// `render_frame` function reads this struct to draw the dashboard.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Competition title shown in the status bar.
    pub title: String,
    pub auth: AuthState,
    pub loading: bool,
    pub refreshing: bool,
    /// Exclude-host leaderboard in backend order.
    pub leaderboard: Vec<Article>,
    pub host_articles: Vec<Article>,
    pub your_submission: Option<Article>,
    pub stats: Option<Stats>,
    /// Fatal error of the latest refresh cycle.
    pub error: Option<String>,
    /// The current error was dismissed with Esc.
    pub error_dismissed: bool,
    pub sort_key: SortKey,
    /// Index into the sorted leaderboard rows.
    pub selected: usize,
    pub show_host: bool,
    pub uploader: UploaderState,
    /// Last status message shown in the status bar.
    pub status_message: Option<String>,
}

impl ViewState {
    pub fn new(title: impl Into<String>) -> Self {
        ViewState {
            title: title.into(),
            loading: true,
            ..Default::default()
        }
    }

    /// Apply a full state snapshot from the orchestrator.
    ///
    /// Local fields (sort key, selection, uploader) are left unchanged.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        if snapshot.error != self.error {
            self.error_dismissed = false;
        }
        self.auth = snapshot.auth;
        self.loading = snapshot.loading;
        self.refreshing = snapshot.refreshing;
        self.leaderboard = snapshot.leaderboard;
        self.host_articles = snapshot.host_articles;
        self.your_submission = snapshot.your_submission;
        self.stats = snapshot.stats;
        self.error = snapshot.error;

        if self.host_articles.is_empty() {
            self.show_host = false;
        }
        self.clamp_selection();
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.leaderboard.len().saturating_sub(1));
    }

    /// Which top-level view the body shows.
    pub fn screen(&self) -> Screen {
        if self.auth.needs_cookies() {
            Screen::AuthRequired
        } else if self.loading {
            Screen::Loading
        } else if self.error.is_some() && !self.error_dismissed {
            Screen::Error
        } else {
            Screen::Dashboard
        }
    }

    /// The selected row in the current sort order.
    pub fn selected_article(&self) -> Option<&Article> {
        leaderboard_core::view::sorted(&self.leaderboard, self.sort_key)
            .get(self.selected)
            .copied()
    }
}

/// Top-level view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    AuthRequired,
    Error,
    Dashboard,
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::OpenCookieUploader => {
            state.uploader.open = true;
        }
        UiUpdate::CookiesAccepted(message) => {
            state.uploader.open = false;
            state.uploader.submitting = false;
            state.uploader.paste_text.clear();
            state.uploader.notice = Some(Notice::Success(message.clone()));
            state.status_message = Some(message);
        }
        UiUpdate::CookieUploadFailed(message) => {
            // Keep everything the user entered so they can fix and resubmit.
            state.uploader.open = true;
            state.uploader.submitting = false;
            state.uploader.notice = Some(Notice::Error(message));
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let area = frame.area();

    match state.screen() {
        Screen::Dashboard => {
            let sections = Sections {
                your_submission: state.your_submission.is_some() && state.stats.is_some(),
                host_rows: state
                    .show_host
                    .then_some(state.host_articles.len()),
            };
            let layout = build_layout(area, sections);

            widgets::status_bar::render(frame, layout.status_bar, state);
            if sections.your_submission {
                widgets::your_submission::render(frame, layout.your_submission, state);
            }
            widgets::leaderboard::render(frame, layout.leaderboard, state);
            widgets::leaderboard::render_detail(frame, layout.detail, state);
            if sections.host_rows.is_some() {
                widgets::host_articles::render(frame, layout.host_articles, state);
            }
            widgets::footer::render(frame, layout.footer, state);
            render_help_bar(frame, layout.help_bar, state);
        }
        screen => {
            let (status, body, help) = build_simple_layout(area);
            widgets::status_bar::render(frame, status, state);
            match screen {
                Screen::Loading => widgets::gate::render_loading(frame, body),
                Screen::AuthRequired => widgets::gate::render_auth_required(frame, body, state),
                _ => widgets::gate::render_error(frame, body, state),
            }
            render_help_bar(frame, help, state);
        }
    }

    if state.uploader.open {
        widgets::cookie_modal::render(frame, area, &state.uploader);
    }
}

/// Keyboard hints for the current view.
pub fn help_text(state: &ViewState) -> String {
    if state.uploader.open {
        return " Tab:Switch field | Enter:Upload | Esc:Close | Ctrl+C:Quit".to_string();
    }
    match state.screen() {
        Screen::Loading => " q:Quit".to_string(),
        Screen::AuthRequired => " u:Upload cookies | q:Quit".to_string(),
        Screen::Error => " r:Retry | Esc:Dismiss | u:Cookies | q:Quit".to_string(),
        Screen::Dashboard => {
            let mut text =
                String::from(" r:Refresh | l/c/s:Sort | j/k:Select | u:Cookies");
            if !state.host_articles.is_empty() {
                text.push_str(" | h:Host articles");
            }
            text.push_str(" | q:Quit");
            text
        }
    }
}

fn render_help_bar(frame: &mut Frame, area: ratatui::layout::Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen, bracketed paste).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, terminal input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    title: String,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    if let Err(e) = execute!(stdout(), EnableBracketedPaste) {
        warn!("Bracketed paste unavailable: {}", e);
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(title);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("UI channel closed, leaving TUI loop");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(Event::Paste(text))) => {
                        input::handle_paste(&text, &mut view_state);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(e.into()),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    let _ = execute!(stdout(), DisableBracketedPaste);
    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
