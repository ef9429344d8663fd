use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pull_request::PullRequestShort;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: String,
    pub username: String,
    // Nullable in the schema; in practice always set on creation.
    pub team_name: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetReviewQuery {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPullRequestsResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShort>,
}
