// Data refresh cycle.
//
// One cycle is a strictly ordered sequence; each step relies on the backend
// having seen the previous one:
//
// 1. POST /refresh                         (transport failure is fatal)
// 2. sleep SETTLE_DELAY
// 3. GET /leaderboard?exclude_host=true    (fatal)
// 4. GET /leaderboard?exclude_host=false   (best-effort)
// 5. filter step 4 down to host articles
// 6. find your submission in step 3
// 7. GET /stats                            (fatal)
//
// The cycle never mutates application state. It returns a `RefreshOutcome`
// carrying everything obtained before any fatal failure; the orchestrator
// decides whether the outcome is still current and commits it.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, LeaderboardApi};
use crate::config::CompetitionConfig;
use crate::model::{Article, Stats};
use crate::view;

/// Wait between triggering the backend scrape and reading its results.
pub const SETTLE_DELAY: Duration = Duration::from_millis(2000);

/// Step of the cycle that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStep {
    TriggerRefresh,
    Leaderboard,
    Stats,
}

impl fmt::Display for FetchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FetchStep::TriggerRefresh => "Failed to trigger refresh",
            FetchStep::Leaderboard => "Failed to fetch leaderboard",
            FetchStep::Stats => "Failed to fetch stats",
        };
        f.write_str(s)
    }
}

/// Fatal failure of a refresh cycle.
#[derive(Debug, Error)]
#[error("{step}: {source}")]
pub struct FetchError {
    pub step: FetchStep,
    #[source]
    pub source: ApiError,
}

impl FetchError {
    fn at(step: FetchStep) -> impl FnOnce(ApiError) -> FetchError {
        move |source| FetchError { step, source }
    }
}

/// Everything one cycle produced.
///
/// `None` fields were not obtained this cycle and must leave the previous
/// value in place when committed.
#[derive(Debug, Default)]
pub struct RefreshOutcome {
    pub generation: u64,
    /// Exclude-host leaderboard in backend order.
    pub leaderboard: Option<Vec<Article>>,
    pub host_articles: Option<Vec<Article>>,
    /// Only meaningful when `leaderboard` is `Some`.
    pub your_submission: Option<Article>,
    pub stats: Option<Stats>,
    pub error: Option<FetchError>,
}

impl RefreshOutcome {
    fn new(generation: u64) -> Self {
        RefreshOutcome {
            generation,
            ..Default::default()
        }
    }

    fn fail(mut self, error: FetchError) -> Self {
        warn!("Refresh cycle {} failed: {}", self.generation, error);
        self.error = Some(error);
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Run one refresh cycle against `api`.
pub async fn run_cycle(
    api: &dyn LeaderboardApi,
    competition: &CompetitionConfig,
    generation: u64,
) -> RefreshOutcome {
    let mut outcome = RefreshOutcome::new(generation);
    info!("Refresh cycle {} started", generation);

    // 1. Ask the backend to re-scrape. The acknowledgement body is ignored.
    if let Err(e) = api.trigger_refresh().await {
        return outcome.fail(FetchError::at(FetchStep::TriggerRefresh)(e));
    }

    // 2. The backend scrapes asynchronously; give it time to land.
    tokio::time::sleep(SETTLE_DELAY).await;

    // 3. Ranked leaderboard.
    let leaderboard = match api
        .leaderboard(true)
        .await
        .map_err(FetchError::at(FetchStep::Leaderboard))
    {
        Ok(articles) => articles,
        Err(e) => return outcome.fail(e),
    };
    debug!("Cycle {}: {} ranked articles", generation, leaderboard.len());

    // 4 + 5. Host articles, best-effort.
    match api.leaderboard(false).await {
        Ok(all) => {
            let hosts = view::host_articles(&all, &competition.host_author);
            debug!("Cycle {}: {} host articles", generation, hosts.len());
            outcome.host_articles = Some(hosts);
        }
        Err(e) => {
            warn!("Host article fetch failed, keeping previous list: {}", e);
        }
    }

    // 6. Your submission.
    outcome.your_submission =
        view::find_your_submission(&leaderboard, &competition.your_article_marker);
    outcome.leaderboard = Some(leaderboard);

    // 7. Aggregates.
    match api
        .stats()
        .await
        .map_err(FetchError::at(FetchStep::Stats))
    {
        Ok(stats) => outcome.stats = Some(stats),
        Err(e) => return outcome.fail(e),
    }

    info!("Refresh cycle {} complete", generation);
    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
