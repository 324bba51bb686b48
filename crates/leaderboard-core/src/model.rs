// Backend data model: articles, aggregate stats, and cookie payloads.
//
// Every type here mirrors a JSON shape served by the leaderboard backend.
// Required fields are plain (non-Option) so a missing or mistyped field is
// rejected by serde at the fetch boundary instead of leaking into rendering.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// One competition submission as ranked by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier, unique within one leaderboard response.
    pub content_id: String,
    pub title: String,
    #[serde(default)]
    pub author_name: Option<String>,
    pub likes_count: u64,
    pub comments_count: u64,
    /// Backend-computed ranking metric.
    pub engagement_score: f64,
    #[serde(default)]
    pub article_url: Option<String>,
}

/// Aggregate counters served by `GET /stats`.
///
/// These are independent of the leaderboard list and must never be derived
/// from it: the totals may include articles the filtered leaderboard omits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_articles: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    /// When the backend last finished a scrape (naive UTC).
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,
    /// Whether a backend scrape is running right now.
    #[serde(default)]
    pub is_updating: bool,
}

// ---------------------------------------------------------------------------
// Cookies
// ---------------------------------------------------------------------------

/// Status string the backend reports for a usable cookie set.
pub const COOKIE_STATUS_VALID: &str = "valid";

/// Status string synthesized locally when the status endpoint is unreachable.
pub const COOKIE_STATUS_ERROR: &str = "error";

/// Status string the backend reports for an accepted cookie upload.
pub const COOKIE_SUBMIT_SUCCESS: &str = "success";

/// Response of `GET /cookies/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookieStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cookie_count: Option<u32>,
}

impl CookieStatus {
    pub fn is_valid(&self) -> bool {
        self.status == COOKIE_STATUS_VALID
    }

    /// Status used when the backend could not be reached at all.
    pub fn unreachable() -> Self {
        CookieStatus {
            status: COOKIE_STATUS_ERROR.to_string(),
            message: Some("Cannot connect to backend".to_string()),
            cookie_count: None,
        }
    }
}

/// A single exported browser cookie.
///
/// Only `name`, `value` and `domain` are read locally; every other key of the
/// export (path, secure, expirationDate, ...) is forwarded to the backend
/// untouched. Field presence is checked by the backend, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieRecord(pub Map<String, Value>);

impl CookieRecord {
    pub fn name(&self) -> Option<&str> {
        self.field("name")
    }

    pub fn value(&self) -> Option<&str> {
        self.field("value")
    }

    pub fn domain(&self) -> Option<&str> {
        self.field("domain")
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Request body of `POST /cookies`.
#[derive(Debug, Serialize)]
pub struct CookieUpload<'a> {
    pub cookies: &'a [CookieRecord],
}

/// Response of `POST /cookies`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CookieSubmitResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub cookie_count: Option<u32>,
}

impl CookieSubmitResponse {
    pub fn is_success(&self) -> bool {
        self.status == COOKIE_SUBMIT_SUCCESS
    }
}

/// Response of `POST /refresh`. Only logged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshAck {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_accepts_null_optionals() {
        let json = r#"{
            "content_id": "abc",
            "title": "Hello",
            "author_name": null,
            "likes_count": 3,
            "comments_count": 1,
            "engagement_score": 4.25,
            "article_url": null
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.content_id, "abc");
        assert!(article.author_name.is_none());
        assert!(article.article_url.is_none());
    }

    #[test]
    fn article_rejects_missing_title() {
        let json = r#"{
            "content_id": "abc",
            "likes_count": 3,
            "comments_count": 1,
            "engagement_score": 4.0
        }"#;
        assert!(serde_json::from_str::<Article>(json).is_err());
    }

    #[test]
    fn article_rejects_negative_likes() {
        let json = r#"{
            "content_id": "abc",
            "title": "t",
            "likes_count": -1,
            "comments_count": 1,
            "engagement_score": 4.0
        }"#;
        assert!(serde_json::from_str::<Article>(json).is_err());
    }

    #[test]
    fn stats_parses_backend_timestamp() {
        let json = r#"{
            "total_articles": 120,
            "total_likes": 900,
            "total_comments": 45,
            "last_updated": "2025-11-03T14:05:09.123456",
            "is_updating": true
        }"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_articles, 120);
        assert!(stats.is_updating);
        let ts = stats.last_updated.unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "14:05");
    }

    #[test]
    fn stats_without_optional_fields() {
        let json = r#"{"total_articles": 1, "total_likes": 2, "total_comments": 3}"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert!(stats.last_updated.is_none());
        assert!(!stats.is_updating);
    }

    #[test]
    fn cookie_record_keeps_extra_fields() {
        let json = r#"{"name":"a","value":"b","domain":"c","secure":true}"#;
        let record: CookieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name(), Some("a"));
        assert_eq!(record.value(), Some("b"));
        assert_eq!(record.domain(), Some("c"));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["secure"], Value::Bool(true));
    }

    #[test]
    fn unreachable_status_is_not_valid() {
        let status = CookieStatus::unreachable();
        assert!(!status.is_valid());
        assert_eq!(status.status, "error");
        assert_eq!(status.message.as_deref(), Some("Cannot connect to backend"));
    }
}
