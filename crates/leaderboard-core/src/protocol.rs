// Messages exchanged between the orchestrator and the dashboard.
//
// The TUI sends `UserCommand`s; the orchestrator answers with `UiUpdate`s.
// Background tasks report back to the orchestrator with `TaskEvent`s.

use crate::api::ApiError;
use crate::auth::AuthState;
use crate::cookies::{CookieSource, CookieUploadError};
use crate::model::{Article, CookieStatus, Stats};
use crate::refresh::RefreshOutcome;

/// Commands from the TUI to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Run a refresh cycle now.
    Refresh,
    /// Read, parse and submit cookies from the given source.
    UploadCookies(CookieSource),
    Quit,
}

/// Updates pushed from the orchestrator to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// Complete view-relevant state; replaces what the TUI holds.
    Snapshot(Box<AppSnapshot>),
    /// The auth check failed or came back not valid.
    OpenCookieUploader,
    /// Cookies were accepted; carries the backend's message.
    CookiesAccepted(String),
    /// The upload attempt failed; carries a user-facing message.
    CookieUploadFailed(String),
}

/// Everything the dashboard renders, captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSnapshot {
    pub auth: AuthState,
    /// Initial load (auth check plus first cycle) still running.
    pub loading: bool,
    /// A refresh cycle is in flight.
    pub refreshing: bool,
    /// Exclude-host leaderboard in backend order.
    pub leaderboard: Vec<Article>,
    pub host_articles: Vec<Article>,
    pub your_submission: Option<Article>,
    pub stats: Option<Stats>,
    /// Fatal error of the latest refresh cycle.
    pub error: Option<String>,
}

/// Results of background tasks, consumed by the orchestrator loop.
#[derive(Debug)]
pub enum TaskEvent {
    AuthChecked {
        generation: u64,
        result: Result<CookieStatus, ApiError>,
    },
    RefreshFinished(RefreshOutcome),
    CookiesUploaded(Result<String, CookieUploadError>),
}
