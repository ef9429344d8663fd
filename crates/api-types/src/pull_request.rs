use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored as text; MERGED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "VARCHAR", rename_all = "UPPERCASE")]
pub enum PullRequestStatus {
    Open,
    Merged,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    // Hydrated from pr_reviewers separately, not a column.
    #[sqlx(skip)]
    #[serde(default)]
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "mergedAt", default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

/// Short form used by the per-user review listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignReviewerRequest {
    pub pull_request_id: String,
    pub old_user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestResponse {
    pub pr: PullRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignReviewerResponse {
    pub pr: PullRequest,
    pub replaced_by: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> PullRequest {
        PullRequest {
            pull_request_id: "pr-1".into(),
            pull_request_name: "Add parser".into(),
            author_id: "u1".into(),
            status: PullRequestStatus::Open,
            assigned_reviewers: vec!["u2".into(), "u3".into()],
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            merged_at: None,
        }
    }

    #[test]
    fn status_uses_uppercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&PullRequestStatus::Open).unwrap(),
            "\"OPEN\""
        );
        assert_eq!(
            serde_json::to_string(&PullRequestStatus::Merged).unwrap(),
            "\"MERGED\""
        );
    }

    #[test]
    fn merged_at_is_omitted_while_open() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["status"], "OPEN");
        assert!(value.get("mergedAt").is_none());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["assigned_reviewers"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn merged_at_appears_once_merged() {
        let mut pr = sample();
        pr.status = PullRequestStatus::Merged;
        pr.merged_at = Some(Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap());
        let value = serde_json::to_value(pr).unwrap();
        assert_eq!(value["status"], "MERGED");
        assert!(value.get("mergedAt").is_some());
    }
}
