// Backend HTTP client.
//
// `LeaderboardApi` is the seam between the workflow and the network: the
// orchestrator and the refresh cycle only see the trait, so tests swap in a
// scripted backend. `HttpBackend` is the reqwest implementation used at
// runtime.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{
    Article, CookieRecord, CookieStatus, CookieSubmitResponse, CookieUpload, RefreshAck, Stats,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, broken body stream, ...
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}")]
    Status { status: u16 },

    /// The body did not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Schema(String),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait LeaderboardApi: Send + Sync {
    /// `GET /cookies/status`
    async fn cookie_status(&self) -> Result<CookieStatus, ApiError>;

    /// `POST /cookies` with `{"cookies": [...]}`.
    async fn submit_cookies(
        &self,
        cookies: &[CookieRecord],
    ) -> Result<CookieSubmitResponse, ApiError>;

    /// `POST /refresh`. Resolves once the backend has acknowledged the
    /// request; the HTTP status is not inspected.
    async fn trigger_refresh(&self) -> Result<RefreshAck, ApiError>;

    /// `GET /leaderboard?exclude_host={exclude_host}`
    async fn leaderboard(&self, exclude_host: bool) -> Result<Vec<Article>, ApiError>;

    /// `GET /stats`
    async fn stats(&self) -> Result<Stats, ApiError>;
}

// ---------------------------------------------------------------------------
// reqwest implementation
// ---------------------------------------------------------------------------

/// Leaderboard backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// `base_url` is the backend root, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpBackend { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LeaderboardApi for HttpBackend {
    async fn cookie_status(&self) -> Result<CookieStatus, ApiError> {
        // The status endpoint reports problems in the body, so the HTTP
        // status is not checked here.
        let response = self.http.get(self.url("/cookies/status")).send().await?;
        decode_body(response).await
    }

    async fn submit_cookies(
        &self,
        cookies: &[CookieRecord],
    ) -> Result<CookieSubmitResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/cookies"))
            .json(&CookieUpload { cookies })
            .send()
            .await?;
        decode_body(response).await
    }

    async fn trigger_refresh(&self) -> Result<RefreshAck, ApiError> {
        let response = self.http.post(self.url("/refresh")).send().await?;
        let status = response.status();
        // The body is informational; a truncated or garbled one is not an error.
        let ack: RefreshAck = match response.text().await {
            Ok(body) => serde_json::from_str(&body).unwrap_or_default(),
            Err(e) => {
                warn!("Could not read refresh acknowledgement: {e}");
                RefreshAck::default()
            }
        };
        debug!(
            http_status = status.as_u16(),
            status = %ack.status,
            message = %ack.message,
            "refresh acknowledged"
        );
        Ok(ack)
    }

    async fn leaderboard(&self, exclude_host: bool) -> Result<Vec<Article>, ApiError> {
        let response = self
            .http
            .get(self.url("/leaderboard"))
            .query(&[("exclude_host", exclude_host)])
            .send()
            .await?;
        let articles: Vec<Article> = decode_success(response).await?;
        ensure_unique_ids(&articles)?;
        Ok(articles)
    }

    async fn stats(&self) -> Result<Stats, ApiError> {
        let response = self.http.get(self.url("/stats")).send().await?;
        decode_success(response).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject non-success responses, then decode the body.
async fn decode_success<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
        });
    }
    decode_body(response).await
}

async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Schema(e.to_string()))
}

/// A leaderboard is keyed by `content_id`; duplicates mean a broken response.
pub fn ensure_unique_ids(articles: &[Article]) -> Result<(), ApiError> {
    let mut seen = HashSet::with_capacity(articles.len());
    for article in articles {
        if !seen.insert(article.content_id.as_str()) {
            return Err(ApiError::Schema(format!(
                "duplicate content_id {}",
                article.content_id
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str) -> Article {
        Article {
            content_id: id.to_string(),
            title: format!("Article {id}"),
            author_name: None,
            likes_count: 0,
            comments_count: 0,
            engagement_score: 0.0,
            article_url: None,
        }
    }

    #[test]
    fn unique_ids_pass() {
        let articles = vec![article("a"), article("b"), article("c")];
        assert!(ensure_unique_ids(&articles).is_ok());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let articles = vec![article("a"), article("b"), article("a")];
        let err = ensure_unique_ids(&articles).unwrap_err();
        assert!(matches!(err, ApiError::Schema(ref m) if m.contains("duplicate content_id a")));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/");
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.url("/stats"), "http://localhost:8000/stats");
    }
}
