use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pull_request::PullRequestStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_teams: i64,
    pub total_users: i64,
    pub total_prs: i64,
    pub total_open_prs: i64,
    pub total_merged_prs: i64,
    pub total_reviews: i64,
    pub avg_reviews_per_pr: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopReviewer {
    pub user_id: String,
    pub username: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserStats {
    pub user_id: String,
    pub username: String,
    pub team_name: Option<String>,
    pub is_active: bool,
    pub prs_count: i64,
    pub reviews_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PullRequestStats {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub author_name: String,
    pub status: PullRequestStatus,
    pub reviewers_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopReviewersQuery {
    #[serde(default, deserialize_with = "lenient_limit")]
    pub limit: Option<i64>,
}

// Unparseable values behave like an absent limit instead of rejecting the
// request; the handler substitutes its default.
fn lenient_limit<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatsResponse {
    pub system_stats: SystemStats,
    pub top_reviewers: Vec<TopReviewer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatsResponse {
    pub user_stats: Vec<UserStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestStatsResponse {
    pub pr_stats: Vec<PullRequestStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopReviewersResponse {
    pub top_reviewers: Vec<TopReviewer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_limit(raw: &str) -> Option<i64> {
        // Query-string values always arrive as strings.
        let query: TopReviewersQuery =
            serde_json::from_str(&format!(r#"{{"limit":"{raw}"}}"#)).unwrap();
        query.limit
    }

    #[test]
    fn limit_parses_numeric_strings() {
        assert_eq!(parse_limit("25"), Some(25));
        assert_eq!(parse_limit("-3"), Some(-3));
    }

    #[test]
    fn limit_falls_back_on_garbage() {
        assert_eq!(parse_limit("abc"), None);
        assert_eq!(parse_limit(""), None);
        assert_eq!(parse_limit("1.5"), None);
    }

    #[test]
    fn limit_is_optional() {
        let query: TopReviewersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, None);
    }
}
