use api_types::{
    CreatePullRequestRequest, MergePullRequestRequest, PullRequestResponse,
    ReassignReviewerRequest, ReassignReviewerResponse,
};
use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use super::{error::ErrorResponse, extract::Json};
use crate::{AppState, db::pull_requests::PullRequestRepository};

#[instrument(
    name = "pull_requests.create",
    skip(state, payload),
    fields(pull_request_id = %payload.pull_request_id, author_id = %payload.author_id)
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreatePullRequestRequest>,
) -> Result<(StatusCode, Json<PullRequestResponse>), ErrorResponse> {
    let pr = PullRequestRepository::create(state.pool(), &payload).await?;

    Ok((StatusCode::CREATED, Json(PullRequestResponse { pr })))
}

#[instrument(
    name = "pull_requests.merge",
    skip(state, payload),
    fields(pull_request_id = %payload.pull_request_id)
)]
pub async fn merge(
    State(state): State<AppState>,
    Json(payload): Json<MergePullRequestRequest>,
) -> Result<Json<PullRequestResponse>, ErrorResponse> {
    let pr = PullRequestRepository::merge(state.pool(), &payload.pull_request_id).await?;

    Ok(Json(PullRequestResponse { pr }))
}

#[instrument(
    name = "pull_requests.reassign",
    skip(state, payload),
    fields(pull_request_id = %payload.pull_request_id, old_user_id = %payload.old_user_id)
)]
pub async fn reassign(
    State(state): State<AppState>,
    Json(payload): Json<ReassignReviewerRequest>,
) -> Result<Json<ReassignReviewerResponse>, ErrorResponse> {
    let (pr, replaced_by) = PullRequestRepository::reassign_reviewer(
        state.pool(),
        &payload.pull_request_id,
        &payload.old_user_id,
    )
    .await?;

    Ok(Json(ReassignReviewerResponse { pr, replaced_by }))
}
