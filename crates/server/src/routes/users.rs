use api_types::{GetReviewQuery, SetActiveRequest, UserPullRequestsResponse, UserResponse};
use axum::extract::State;
use tracing::instrument;

use super::{
    error::ErrorResponse,
    extract::{Json, Query},
};
use crate::{AppState, db::users::UserRepository};

#[instrument(
    name = "users.set_is_active",
    skip(state, payload),
    fields(user_id = %payload.user_id, is_active = payload.is_active)
)]
pub async fn set_is_active(
    State(state): State<AppState>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<Json<UserResponse>, ErrorResponse> {
    let user = UserRepository::set_active(state.pool(), &payload.user_id, payload.is_active).await?;

    Ok(Json(UserResponse { user }))
}

#[instrument(name = "users.get_review", skip(state, query), fields(user_id = %query.user_id))]
pub async fn get_review(
    State(state): State<AppState>,
    Query(query): Query<GetReviewQuery>,
) -> Result<Json<UserPullRequestsResponse>, ErrorResponse> {
    if query.user_id.is_empty() {
        return Err(ErrorResponse::invalid_request("user_id is required"));
    }

    let pull_requests = UserRepository::review_assignments(state.pool(), &query.user_id).await?;

    Ok(Json(UserPullRequestsResponse {
        user_id: query.user_id,
        pull_requests,
    }))
}
