use api_types::{PullRequestStats, SystemStats, TopReviewer, UserStats};
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct StatsRepository;

impl StatsRepository {
    /// Entity/status totals. Each count is read independently; there is no
    /// cross-query isolation within one report.
    pub async fn system(pool: &PgPool) -> Result<SystemStats, StatsError> {
        let total_teams: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
            .fetch_one(pool)
            .await?;
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        let total_prs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pull_requests")
            .fetch_one(pool)
            .await?;
        let total_open_prs: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pull_requests WHERE status = 'OPEN'")
                .fetch_one(pool)
                .await?;
        let total_merged_prs: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pull_requests WHERE status = 'MERGED'")
                .fetch_one(pool)
                .await?;
        let total_reviews: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pr_reviewers")
            .fetch_one(pool)
            .await?;

        Ok(SystemStats {
            total_teams,
            total_users,
            total_prs,
            total_open_prs,
            total_merged_prs,
            total_reviews,
            avg_reviews_per_pr: average_reviews_per_pr(total_reviews, total_prs),
        })
    }

    pub async fn top_reviewers(pool: &PgPool, limit: i64) -> Result<Vec<TopReviewer>, StatsError> {
        let reviewers = sqlx::query_as::<_, TopReviewer>(
            r#"
            SELECT u.user_id, u.username, COUNT(pr.reviewer_id) AS count
            FROM users u
            LEFT JOIN pr_reviewers pr ON u.user_id = pr.reviewer_id
            GROUP BY u.user_id, u.username
            ORDER BY count DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(reviewers)
    }

    pub async fn per_user(pool: &PgPool) -> Result<Vec<UserStats>, StatsError> {
        let stats = sqlx::query_as::<_, UserStats>(
            r#"
            SELECT
                u.user_id,
                u.username,
                u.team_name,
                u.is_active,
                COUNT(DISTINCT pr_author.pull_request_id) AS prs_count,
                COUNT(DISTINCT prr.pull_request_id) AS reviews_count
            FROM users u
            LEFT JOIN pull_requests pr_author ON u.user_id = pr_author.author_id
            LEFT JOIN pr_reviewers prr ON u.user_id = prr.reviewer_id
            GROUP BY u.user_id, u.username, u.team_name, u.is_active
            ORDER BY reviews_count DESC, prs_count DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(stats)
    }

    pub async fn per_pull_request(pool: &PgPool) -> Result<Vec<PullRequestStats>, StatsError> {
        let stats = sqlx::query_as::<_, PullRequestStats>(
            r#"
            SELECT
                pr.pull_request_id,
                pr.pull_request_name,
                pr.author_id,
                u.username AS author_name,
                pr.status,
                COUNT(prr.reviewer_id) AS reviewers_count,
                pr.created_at,
                pr.merged_at
            FROM pull_requests pr
            LEFT JOIN users u ON pr.author_id = u.user_id
            LEFT JOIN pr_reviewers prr ON pr.pull_request_id = prr.pull_request_id
            GROUP BY pr.pull_request_id, pr.pull_request_name, pr.author_id, u.username,
                     pr.status, pr.created_at, pr.merged_at
            ORDER BY pr.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(stats)
    }
}

fn average_reviews_per_pr(total_reviews: i64, total_prs: i64) -> f64 {
    if total_prs > 0 {
        total_reviews as f64 / total_prs as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_reviews_over_prs() {
        assert_eq!(average_reviews_per_pr(6, 4), 1.5);
        assert_eq!(average_reviews_per_pr(0, 3), 0.0);
    }

    #[test]
    fn average_is_zero_without_prs() {
        assert_eq!(average_reviews_per_pr(0, 0), 0.0);
        assert_eq!(average_reviews_per_pr(7, 0), 0.0);
    }
}
