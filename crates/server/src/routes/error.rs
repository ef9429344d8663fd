use api_types::{ApiErrorCode, ErrorBody};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::db::{
    pull_requests::PullRequestError, stats::StatsError, teams::TeamError, users::UserError,
};

/// Transport-level rendering of a workflow outcome. Every non-2xx response
/// goes through this type so the error body shape is uniform.
#[derive(Debug)]
pub struct ErrorResponse {
    status: StatusCode,
    code: ApiErrorCode,
    message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorCode::InvalidRequest, message)
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        // Raw message surfaced; acceptable for an internal tool.
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorCode::InternalError,
            error.to_string(),
        )
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.code, self.message))).into_response()
    }
}

impl From<TeamError> for ErrorResponse {
    fn from(error: TeamError) -> Self {
        match error {
            TeamError::AlreadyExists => Self::new(
                StatusCode::BAD_REQUEST,
                ApiErrorCode::TeamExists,
                "team_name already exists",
            ),
            TeamError::Database(error) => {
                tracing::error!(%error, "team storage error");
                Self::internal(error)
            }
        }
    }
}

impl From<UserError> for ErrorResponse {
    fn from(error: UserError) -> Self {
        match error {
            UserError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                ApiErrorCode::NotFound,
                "resource not found",
            ),
            UserError::Database(error) => {
                tracing::error!(%error, "user storage error");
                Self::internal(error)
            }
        }
    }
}

impl From<PullRequestError> for ErrorResponse {
    fn from(error: PullRequestError) -> Self {
        match error {
            PullRequestError::AlreadyExists => Self::new(
                StatusCode::CONFLICT,
                ApiErrorCode::PrExists,
                "PR id already exists",
            ),
            PullRequestError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                ApiErrorCode::NotFound,
                "resource not found",
            ),
            PullRequestError::Merged => Self::new(
                StatusCode::CONFLICT,
                ApiErrorCode::PrMerged,
                "cannot reassign on merged PR",
            ),
            PullRequestError::NotAssigned => Self::new(
                StatusCode::CONFLICT,
                ApiErrorCode::NotAssigned,
                "reviewer is not assigned to this PR",
            ),
            PullRequestError::NoCandidate => Self::new(
                StatusCode::CONFLICT,
                ApiErrorCode::NoCandidate,
                "no active replacement candidate in team",
            ),
            PullRequestError::Database(error) => {
                tracing::error!(%error, "pull request storage error");
                Self::internal(error)
            }
        }
    }
}

impl From<StatsError> for ErrorResponse {
    fn from(error: StatsError) -> Self {
        match error {
            StatsError::Database(error) => {
                tracing::error!(%error, "stats storage error");
                Self::internal(error)
            }
        }
    }
}
