// Derived leaderboard view: sorting, competition rank, host filtering and
// identification of the user's own submission.
//
// Everything here is a pure function of the fetched articles. Nothing mutates
// the source vectors; sorting returns borrowed rows in display order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::Article;

/// Placeholder shown for an article without an author.
pub const MISSING_AUTHOR: &str = "—";

/// Column the leaderboard table is ordered by. Always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Likes,
    Comments,
    #[default]
    EngagementScore,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Likes => "Likes",
            SortKey::Comments => "Comments",
            SortKey::EngagementScore => "Score",
        }
    }

    fn compare(self, a: &Article, b: &Article) -> Ordering {
        match self {
            SortKey::Likes => b.likes_count.cmp(&a.likes_count),
            SortKey::Comments => b.comments_count.cmp(&a.comments_count),
            SortKey::EngagementScore => b.engagement_score.total_cmp(&a.engagement_score),
        }
    }
}

/// Rows in display order for `key`.
///
/// The sort is stable: articles that tie keep the order the backend returned.
pub fn sorted(articles: &[Article], key: SortKey) -> Vec<&Article> {
    let mut rows: Vec<&Article> = articles.iter().collect();
    rows.sort_by(|a, b| key.compare(a, b));
    rows
}

/// Competition rank of `content_id`: its 1-based position in the
/// exclude-host leaderboard exactly as the backend ordered it.
///
/// Independent of the current sort key.
pub fn rank_of(leaderboard: &[Article], content_id: &str) -> Option<usize> {
    leaderboard
        .iter()
        .position(|a| a.content_id == content_id)
        .map(|i| i + 1)
}

/// Ranks of every article keyed by `content_id`, for lookups once per row.
pub fn ranks(leaderboard: &[Article]) -> HashMap<&str, usize> {
    leaderboard
        .iter()
        .enumerate()
        .map(|(i, a)| (a.content_id.as_str(), i + 1))
        .collect()
}

/// Articles whose author is exactly `host_author`.
pub fn host_articles(all: &[Article], host_author: &str) -> Vec<Article> {
    all.iter()
        .filter(|a| a.author_name.as_deref() == Some(host_author))
        .cloned()
        .collect()
}

/// First article (backend order) whose title contains `marker`.
pub fn find_your_submission(articles: &[Article], marker: &str) -> Option<Article> {
    articles.iter().find(|a| a.title.contains(marker)).cloned()
}

pub fn is_yours(article: &Article, yours: Option<&Article>) -> bool {
    yours.is_some_and(|y| y.content_id == article.content_id)
}

/// Engagement score with one decimal place.
pub fn format_score(score: f64) -> String {
    format!("{score:.1}")
}

pub fn author_label(article: &Article) -> &str {
    article.author_name.as_deref().unwrap_or(MISSING_AUTHOR)
}

/// e.g. "Show 3 host articles" / "Hide 1 host article".
pub fn host_toggle_label(count: usize, shown: bool) -> String {
    let verb = if shown { "Hide" } else { "Show" };
    let plural = if count > 1 { "s" } else { "" };
    format!("{verb} {count} host article{plural}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
