// Scripted in-memory backend for unit tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::api::{ensure_unique_ids, ApiError, LeaderboardApi};
use crate::model::{
    Article, CookieRecord, CookieStatus, CookieSubmitResponse, RefreshAck, Stats,
};

/// Canned responses. `Err(code)` answers with `ApiError::Status { status: code }`.
#[derive(Debug, Clone)]
pub struct Script {
    pub status: Result<CookieStatus, u16>,
    pub submit: Result<CookieSubmitResponse, u16>,
    pub trigger: Result<(), u16>,
    pub ranked: Result<Vec<Article>, u16>,
    pub all: Result<Vec<Article>, u16>,
    pub stats: Result<Stats, u16>,
}

impl Default for Script {
    fn default() -> Self {
        Script {
            status: Ok(CookieStatus {
                status: "valid".into(),
                message: Some("Found 3 cookies".into()),
                cookie_count: Some(3),
            }),
            submit: Ok(CookieSubmitResponse {
                status: "success".into(),
                message: "Updated 1 cookies".into(),
                cookie_count: Some(1),
            }),
            trigger: Ok(()),
            ranked: Ok(Vec::new()),
            all: Ok(Vec::new()),
            stats: Ok(stats(0, 0, 0)),
        }
    }
}

#[derive(Debug, Default)]
struct Recorded {
    calls: Vec<&'static str>,
    submitted: Vec<Vec<CookieRecord>>,
}

#[derive(Debug, Default)]
pub struct ScriptedApi {
    script: Mutex<Script>,
    recorded: Mutex<Recorded>,
}

impl ScriptedApi {
    pub fn new(script: Script) -> Self {
        ScriptedApi {
            script: Mutex::new(script),
            recorded: Mutex::new(Recorded::default()),
        }
    }

    /// Change responses for subsequent calls.
    pub fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    /// Endpoint names in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.recorded.lock().unwrap().calls.clone()
    }

    pub fn submitted(&self) -> Vec<Vec<CookieRecord>> {
        self.recorded.lock().unwrap().submitted.clone()
    }

    fn record(&self, call: &'static str) {
        self.recorded.lock().unwrap().calls.push(call);
    }
}

fn reply<T: Clone>(r: &Result<T, u16>) -> Result<T, ApiError> {
    r.clone().map_err(|status| ApiError::Status { status })
}

#[async_trait]
impl LeaderboardApi for ScriptedApi {
    async fn cookie_status(&self) -> Result<CookieStatus, ApiError> {
        self.record("status");
        reply(&self.script().status)
    }

    async fn submit_cookies(
        &self,
        cookies: &[CookieRecord],
    ) -> Result<CookieSubmitResponse, ApiError> {
        self.record("submit");
        self.recorded
            .lock()
            .unwrap()
            .submitted
            .push(cookies.to_vec());
        reply(&self.script().submit)
    }

    async fn trigger_refresh(&self) -> Result<RefreshAck, ApiError> {
        self.record("refresh");
        reply(&self.script().trigger).map(|_| RefreshAck::default())
    }

    async fn leaderboard(&self, exclude_host: bool) -> Result<Vec<Article>, ApiError> {
        let articles = if exclude_host {
            self.record("leaderboard_ranked");
            reply(&self.script().ranked)?
        } else {
            self.record("leaderboard_all");
            reply(&self.script().all)?
        };
        ensure_unique_ids(&articles)?;
        Ok(articles)
    }

    async fn stats(&self) -> Result<Stats, ApiError> {
        self.record("stats");
        reply(&self.script().stats)
    }
}

pub fn article(id: &str, title: &str, author: Option<&str>, likes: u64, score: f64) -> Article {
    Article {
        content_id: id.to_string(),
        title: title.to_string(),
        author_name: author.map(str::to_string),
        likes_count: likes,
        comments_count: 0,
        engagement_score: score,
        article_url: Some(format!("https://example.com/{id}")),
    }
}

pub fn stats(articles: u64, likes: u64, comments: u64) -> Stats {
    Stats {
        total_articles: articles,
        total_likes: likes,
        total_comments: comments,
        last_updated: None,
        is_updating: false,
    }
}
