use api_types::{PullRequestShort, User};
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("user not found")]
    NotFound,
}

pub struct UserRepository;

impl UserRepository {
    /// Flips reviewer eligibility. Existing assignments are not touched.
    pub async fn set_active(
        pool: &PgPool,
        user_id: &str,
        is_active: bool,
    ) -> Result<User, UserError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET is_active = $1
            WHERE user_id = $2
            RETURNING user_id, username, team_name, is_active
            "#,
        )
        .bind(is_active)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(UserError::NotFound)
    }

    /// PRs the user is currently assigned to review.
    pub async fn review_assignments(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>, UserError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        if !exists {
            return Err(UserError::NotFound);
        }

        let pull_requests = sqlx::query_as::<_, PullRequestShort>(
            r#"
            SELECT pr.pull_request_id, pr.pull_request_name, pr.author_id, pr.status
            FROM pull_requests pr
            JOIN pr_reviewers prr ON pr.pull_request_id = prr.pull_request_id
            WHERE prr.reviewer_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(pull_requests)
    }
}
