use api_types::{GetTeamQuery, Team, TeamResponse};
use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use super::{
    error::ErrorResponse,
    extract::{Json, Query},
};
use crate::{AppState, db::teams::TeamRepository};

#[instrument(
    name = "teams.add_team",
    skip(state, payload),
    fields(team_name = %payload.team_name, members = payload.members.len())
)]
pub async fn add_team(
    State(state): State<AppState>,
    Json(payload): Json<Team>,
) -> Result<(StatusCode, Json<TeamResponse>), ErrorResponse> {
    TeamRepository::create(state.pool(), &payload).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse { team: payload })))
}

#[instrument(name = "teams.get_team", skip(state, query), fields(team_name = %query.team_name))]
pub async fn get_team(
    State(state): State<AppState>,
    Query(query): Query<GetTeamQuery>,
) -> Result<Json<Team>, ErrorResponse> {
    if query.team_name.is_empty() {
        return Err(ErrorResponse::invalid_request("team_name is required"));
    }

    let team = TeamRepository::find_by_name(state.pool(), &query.team_name)
        .await?
        .ok_or_else(|| {
            ErrorResponse::new(
                StatusCode::NOT_FOUND,
                api_types::ApiErrorCode::NotFound,
                "resource not found",
            )
        })?;

    Ok(Json(team))
}
