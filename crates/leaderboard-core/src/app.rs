// Application state and orchestration logic.
//
// `AppState` is the single owner of all view state. Network work (status
// checks, refresh cycles, cookie uploads) runs in spawned tasks that report
// back over a `TaskEvent` channel; only the event loop applies their results.
// After every change the loop pushes an `AppSnapshot` to the TUI.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{ApiError, LeaderboardApi};
use crate::auth::{self, AuthGate, AuthTransition};
use crate::config::Config;
use crate::cookies::{self, CookieSource, CookieUploadError};
use crate::model::{Article, CookieStatus, Stats};
use crate::protocol::{AppSnapshot, TaskEvent, UiUpdate, UserCommand};
use crate::refresh::{self, RefreshOutcome};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn LeaderboardApi>,
    pub auth: AuthGate,
    /// True until the first check (and, if valid, the first cycle) resolves.
    /// Re-armed by every auth check.
    pub loading: bool,
    /// A refresh cycle is in flight. Cleared only by the current cycle.
    pub refreshing: bool,
    /// Monotonically increasing id of the latest refresh cycle. Outcomes
    /// carrying an older id are discarded in `commit_refresh`.
    pub refresh_generation: u64,
    /// Same scheme for cookie status checks.
    pub auth_generation: u64,
    /// Exclude-host leaderboard in backend order.
    pub leaderboard: Vec<Article>,
    pub host_articles: Vec<Article>,
    pub your_submission: Option<Article>,
    pub stats: Option<Stats>,
    /// Fatal error of the latest committed cycle.
    pub error: Option<String>,
    /// Sender handed to spawned tasks.
    pub task_tx: mpsc::Sender<TaskEvent>,
}

impl AppState {
    pub fn new(
        config: Config,
        api: Arc<dyn LeaderboardApi>,
        task_tx: mpsc::Sender<TaskEvent>,
    ) -> Self {
        AppState {
            config,
            api,
            auth: AuthGate::new(),
            loading: true,
            refreshing: false,
            refresh_generation: 0,
            auth_generation: 0,
            leaderboard: Vec::new(),
            host_articles: Vec::new(),
            your_submission: None,
            stats: None,
            error: None,
            task_tx,
        }
    }

    /// Enter `Checking` and query the backend for cookie validity.
    pub fn begin_auth_check(&mut self) {
        self.auth.begin_check();
        self.loading = true;
        self.auth_generation += 1;
        let generation = self.auth_generation;

        let api = Arc::clone(&self.api);
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = auth::check_status(api.as_ref()).await;
            let _ = tx.send(TaskEvent::AuthChecked { generation, result }).await;
        });
        debug!("Cookie status check started (gen: {})", generation);
    }

    /// Apply a status check result. Starts a refresh cycle on unlock.
    pub fn handle_auth_checked(
        &mut self,
        generation: u64,
        result: Result<CookieStatus, ApiError>,
    ) -> AuthTransition {
        if generation != self.auth_generation {
            debug!(
                "Discarding stale cookie status (event gen: {}, current gen: {})",
                generation, self.auth_generation
            );
            return AuthTransition::Ignored;
        }

        let transition = self.auth.resolve(result);
        match transition {
            AuthTransition::Unlocked => {
                self.start_refresh();
            }
            AuthTransition::NeedsCookies => {
                self.loading = false;
            }
            AuthTransition::Ignored => {}
        }
        transition
    }

    /// Spawn a new refresh cycle and return its generation.
    ///
    /// Never aborts a cycle already in flight; the older one's outcome is
    /// simply discarded when it arrives.
    pub fn start_refresh(&mut self) -> u64 {
        self.refresh_generation += 1;
        let generation = self.refresh_generation;
        self.refreshing = true;

        let api = Arc::clone(&self.api);
        let competition = self.config.competition.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let outcome = refresh::run_cycle(api.as_ref(), &competition, generation).await;
            let _ = tx.send(TaskEvent::RefreshFinished(outcome)).await;
        });
        info!("Triggered refresh cycle (gen: {})", generation);
        generation
    }

    /// Commit a finished cycle if it is still the latest one.
    ///
    /// Returns `false` when the outcome was stale and nothing changed.
    pub fn commit_refresh(&mut self, outcome: RefreshOutcome) -> bool {
        if outcome.generation != self.refresh_generation {
            debug!(
                "Discarding stale refresh outcome (event gen: {}, current gen: {})",
                outcome.generation, self.refresh_generation
            );
            return false;
        }

        if let Some(leaderboard) = outcome.leaderboard {
            self.leaderboard = leaderboard;
            self.your_submission = outcome.your_submission;
        }
        if let Some(hosts) = outcome.host_articles {
            self.host_articles = hosts;
        }
        if let Some(stats) = outcome.stats {
            self.stats = Some(stats);
        }
        self.error = outcome.error.map(|e| e.to_string());
        self.refreshing = false;
        self.loading = false;
        true
    }

    /// Start an upload from `source`.
    ///
    /// Pasted text is parsed right here so a malformed paste is reported
    /// without touching the network. File input is read inside the task.
    pub fn start_cookie_upload(&mut self, source: CookieSource) -> Result<(), CookieUploadError> {
        let api = Arc::clone(&self.api);
        let tx = self.task_tx.clone();

        match source {
            CookieSource::Paste(ref text) => {
                let records = cookies::parse_cookies(text)
                    .map_err(|e| CookieUploadError::parse(&source, e))?;
                info!("Submitting {} pasted cookies", records.len());
                tokio::spawn(async move {
                    let result = cookies::submit(api.as_ref(), &records)
                        .await
                        .map_err(CookieUploadError::from);
                    let _ = tx.send(TaskEvent::CookiesUploaded(result)).await;
                });
            }
            CookieSource::File(ref path) => {
                info!("Uploading cookies from {}", path.display());
                tokio::spawn(async move {
                    let result = cookies::upload(api.as_ref(), &source).await;
                    let _ = tx.send(TaskEvent::CookiesUploaded(result)).await;
                });
            }
        }
        Ok(())
    }

    /// Build an `AppSnapshot` from the current application state.
    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            auth: self.auth.state().clone(),
            loading: self.loading,
            refreshing: self.refreshing,
            leaderboard: self.leaderboard.clone(),
            host_articles: self.host_articles.clone(),
            your_submission: self.your_submission.clone(),
            stats: self.stats.clone(),
            error: self.error.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Kicks off the initial cookie status check, then listens on:
/// 1. User commands from the TUI
/// 2. Results of spawned background tasks
///
/// Pushes UI updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut task_rx: mpsc::Receiver<TaskEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    state.begin_auth_check();
    send_snapshot(&state, &ui_tx).await;

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Background task results ---
            event = task_rx.recv() => {
                match event {
                    Some(event) => {
                        handle_task_event(&mut state, event, &ui_tx).await;
                    }
                    None => {
                        info!("Task channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx.send(UiUpdate::Snapshot(Box::new(snapshot))).await;
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::Refresh => {
            info!("Manual refresh requested");
            state.start_refresh();
            send_snapshot(state, ui_tx).await;
        }
        UserCommand::UploadCookies(source) => {
            if let Err(e) = state.start_cookie_upload(source) {
                warn!("Cookie upload rejected locally: {}", e);
                let _ = ui_tx.send(UiUpdate::CookieUploadFailed(e.to_string())).await;
            }
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

/// Handle the result of a spawned task.
async fn handle_task_event(
    state: &mut AppState,
    event: TaskEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match event {
        TaskEvent::AuthChecked { generation, result } => {
            let transition = state.handle_auth_checked(generation, result);
            if transition == AuthTransition::Ignored {
                return;
            }
            if transition == AuthTransition::NeedsCookies {
                let _ = ui_tx.send(UiUpdate::OpenCookieUploader).await;
            }
            send_snapshot(state, ui_tx).await;
        }
        TaskEvent::RefreshFinished(outcome) => {
            if state.commit_refresh(outcome) {
                send_snapshot(state, ui_tx).await;
            }
        }
        TaskEvent::CookiesUploaded(Ok(message)) => {
            let _ = ui_tx.send(UiUpdate::CookiesAccepted(message)).await;
            // Re-check validity, and refresh without waiting for the check.
            state.begin_auth_check();
            state.start_refresh();
            send_snapshot(state, ui_tx).await;
        }
        TaskEvent::CookiesUploaded(Err(e)) => {
            warn!("Cookie upload failed: {}", e);
            let _ = ui_tx.send(UiUpdate::CookieUploadFailed(e.to_string())).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
