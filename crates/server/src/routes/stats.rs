use api_types::{
    PullRequestStatsResponse, SystemStatsResponse, TopReviewersQuery, TopReviewersResponse,
    UserStatsResponse,
};
use axum::extract::State;
use tracing::instrument;

use super::{
    error::ErrorResponse,
    extract::{Json, Query},
};
use crate::{AppState, db::stats::StatsRepository};

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 50;

/// Reviewers embedded in the system report.
const SYSTEM_TOP_REVIEWERS: i64 = 5;

#[instrument(name = "stats.system", skip(state))]
pub async fn system(
    State(state): State<AppState>,
) -> Result<Json<SystemStatsResponse>, ErrorResponse> {
    let system_stats = StatsRepository::system(state.pool()).await?;
    let top_reviewers = StatsRepository::top_reviewers(state.pool(), SYSTEM_TOP_REVIEWERS).await?;

    Ok(Json(SystemStatsResponse {
        system_stats,
        top_reviewers,
    }))
}

#[instrument(name = "stats.users", skip(state))]
pub async fn users(State(state): State<AppState>) -> Result<Json<UserStatsResponse>, ErrorResponse> {
    let user_stats = StatsRepository::per_user(state.pool()).await?;

    Ok(Json(UserStatsResponse { user_stats }))
}

#[instrument(name = "stats.prs", skip(state))]
pub async fn prs(
    State(state): State<AppState>,
) -> Result<Json<PullRequestStatsResponse>, ErrorResponse> {
    let pr_stats = StatsRepository::per_pull_request(state.pool()).await?;

    Ok(Json(PullRequestStatsResponse { pr_stats }))
}

#[instrument(name = "stats.top_reviewers", skip(state, query), fields(limit = ?query.limit))]
pub async fn top_reviewers(
    State(state): State<AppState>,
    Query(query): Query<TopReviewersQuery>,
) -> Result<Json<TopReviewersResponse>, ErrorResponse> {
    let limit = clamp_limit(query.limit);
    let top_reviewers = StatsRepository::top_reviewers(state.pool(), limit).await?;

    Ok(Json(TopReviewersResponse { top_reviewers }))
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(n) if n > MAX_LIMIT => MAX_LIMIT,
        Some(n) if n > 0 => n,
        // Absent or non-positive falls back to the default.
        _ => DEFAULT_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_to_ten() {
        assert_eq!(clamp_limit(None), 10);
        assert_eq!(clamp_limit(Some(0)), 10);
        assert_eq!(clamp_limit(Some(-3)), 10);
    }

    #[test]
    fn limit_clamps_to_fifty() {
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(51)), 50);
        assert_eq!(clamp_limit(Some(500)), 50);
    }

    #[test]
    fn limit_passes_through_in_range() {
        assert_eq!(clamp_limit(Some(1)), 1);
        assert_eq!(clamp_limit(Some(25)), 25);
    }
}
