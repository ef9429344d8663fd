use api_types::{CreatePullRequestRequest, PullRequest, PullRequestStatus};
use sqlx::{PgConnection, PgPool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PullRequestError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("pull request id already exists")]
    AlreadyExists,
    #[error("resource not found")]
    NotFound,
    #[error("pull request is merged")]
    Merged,
    #[error("reviewer is not assigned to this pull request")]
    NotAssigned,
    #[error("no active replacement candidate in team")]
    NoCandidate,
}

pub struct PullRequestRepository;

impl PullRequestRepository {
    /// Creates the PR and assigns up to two reviewers in one transaction.
    ///
    /// Reviewer candidates are active members of the author's team, excluding
    /// the author, in no guaranteed order: "up to 2 arbitrary eligible
    /// teammates". A team with fewer eligible members yields fewer reviewers;
    /// zero is valid.
    pub async fn create(
        pool: &PgPool,
        request: &CreatePullRequestRequest,
    ) -> Result<PullRequest, PullRequestError> {
        let mut tx = pool.begin().await?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM pull_requests WHERE pull_request_id = $1)",
        )
        .bind(&request.pull_request_id)
        .fetch_one(&mut *tx)
        .await?;
        if exists {
            return Err(PullRequestError::AlreadyExists);
        }

        let author_team: Option<Option<String>> =
            sqlx::query_scalar("SELECT team_name FROM users WHERE user_id = $1")
                .bind(&request.author_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(author_team) = author_team else {
            return Err(PullRequestError::NotFound);
        };

        sqlx::query(
            r#"
            INSERT INTO pull_requests (pull_request_id, pull_request_name, author_id, status)
            VALUES ($1, $2, $3, 'OPEN')
            "#,
        )
        .bind(&request.pull_request_id)
        .bind(&request.pull_request_name)
        .bind(&request.author_id)
        .execute(&mut *tx)
        .await
        .map_err(unique_violation_to_exists)?;

        // An author without a team gets no reviewers rather than an error.
        let reviewers: Vec<String> = match author_team {
            Some(team_name) => {
                sqlx::query_scalar(
                    r#"
                    SELECT user_id FROM users
                    WHERE team_name = $1
                    AND user_id != $2
                    AND is_active = true
                    LIMIT 2
                    "#,
                )
                .bind(&team_name)
                .bind(&request.author_id)
                .fetch_all(&mut *tx)
                .await?
            }
            None => Vec::new(),
        };

        for reviewer_id in &reviewers {
            sqlx::query("INSERT INTO pr_reviewers (pull_request_id, reviewer_id) VALUES ($1, $2)")
                .bind(&request.pull_request_id)
                .bind(reviewer_id)
                .execute(&mut *tx)
                .await?;
        }

        let pr = Self::hydrate(&mut *tx, &request.pull_request_id).await?;
        tx.commit().await?;
        Ok(pr)
    }

    /// Merges the PR. Merging an already-MERGED PR is an idempotent no-op
    /// returning the current state, timestamps included.
    pub async fn merge(pool: &PgPool, pull_request_id: &str) -> Result<PullRequest, PullRequestError> {
        let mut tx = pool.begin().await?;

        let status: Option<PullRequestStatus> =
            sqlx::query_scalar("SELECT status FROM pull_requests WHERE pull_request_id = $1")
                .bind(pull_request_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(status) = status else {
            return Err(PullRequestError::NotFound);
        };

        if status == PullRequestStatus::Merged {
            let pr = Self::hydrate(&mut *tx, pull_request_id).await?;
            tx.commit().await?;
            return Ok(pr);
        }

        sqlx::query(
            r#"
            UPDATE pull_requests
            SET status = 'MERGED', merged_at = now()
            WHERE pull_request_id = $1
            "#,
        )
        .bind(pull_request_id)
        .execute(&mut *tx)
        .await?;

        let pr = Self::hydrate(&mut *tx, pull_request_id).await?;
        tx.commit().await?;
        Ok(pr)
    }

    /// Swaps one assignment row to a fresh eligible teammate.
    ///
    /// The candidate filter is: active, same team as the author, not the
    /// author, not already assigned to this PR. First match wins; callers
    /// must not assume a deterministic pick. On `NoCandidate` the old
    /// assignment is left untouched.
    pub async fn reassign_reviewer(
        pool: &PgPool,
        pull_request_id: &str,
        old_user_id: &str,
    ) -> Result<(PullRequest, String), PullRequestError> {
        let mut tx = pool.begin().await?;

        let head: Option<(PullRequestStatus, String)> = sqlx::query_as(
            "SELECT status, author_id FROM pull_requests WHERE pull_request_id = $1",
        )
        .bind(pull_request_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((status, author_id)) = head else {
            return Err(PullRequestError::NotFound);
        };

        if status == PullRequestStatus::Merged {
            return Err(PullRequestError::Merged);
        }

        let is_assigned: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM pr_reviewers WHERE pull_request_id = $1 AND reviewer_id = $2)",
        )
        .bind(pull_request_id)
        .bind(old_user_id)
        .fetch_one(&mut *tx)
        .await?;
        if !is_assigned {
            return Err(PullRequestError::NotAssigned);
        }

        let author_team: Option<String> =
            sqlx::query_scalar("SELECT team_name FROM users WHERE user_id = $1")
                .bind(&author_id)
                .fetch_one(&mut *tx)
                .await?;

        let candidate: Option<String> = match author_team {
            Some(team_name) => {
                sqlx::query_scalar(
                    r#"
                    SELECT u.user_id FROM users u
                    WHERE u.team_name = $1
                    AND u.user_id != $2
                    AND u.is_active = true
                    AND u.user_id NOT IN (
                        SELECT reviewer_id FROM pr_reviewers WHERE pull_request_id = $3
                    )
                    LIMIT 1
                    "#,
                )
                .bind(&team_name)
                .bind(&author_id)
                .bind(pull_request_id)
                .fetch_optional(&mut *tx)
                .await?
            }
            None => None,
        };
        let Some(new_user_id) = candidate else {
            return Err(PullRequestError::NoCandidate);
        };

        sqlx::query(
            r#"
            UPDATE pr_reviewers
            SET reviewer_id = $1
            WHERE pull_request_id = $2 AND reviewer_id = $3
            "#,
        )
        .bind(&new_user_id)
        .bind(pull_request_id)
        .bind(old_user_id)
        .execute(&mut *tx)
        .await?;

        let pr = Self::hydrate(&mut *tx, pull_request_id).await?;
        tx.commit().await?;
        Ok((pr, new_user_id))
    }

    /// Loads the PR row plus its current reviewer set within the caller's
    /// transaction.
    async fn hydrate(
        conn: &mut PgConnection,
        pull_request_id: &str,
    ) -> Result<PullRequest, PullRequestError> {
        let mut pr = sqlx::query_as::<_, PullRequest>(
            r#"
            SELECT pull_request_id, pull_request_name, author_id, status, created_at, merged_at
            FROM pull_requests
            WHERE pull_request_id = $1
            "#,
        )
        .bind(pull_request_id)
        .fetch_one(&mut *conn)
        .await?;

        pr.assigned_reviewers =
            sqlx::query_scalar("SELECT reviewer_id FROM pr_reviewers WHERE pull_request_id = $1")
                .bind(pull_request_id)
                .fetch_all(&mut *conn)
                .await?;

        Ok(pr)
    }
}

// The pre-check is an optimization; the primary key is the authoritative
// guard against two concurrent creations of the same id.
fn unique_violation_to_exists(error: sqlx::Error) -> PullRequestError {
    match &error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            PullRequestError::AlreadyExists
        }
        _ => PullRequestError::Database(error),
    }
}
