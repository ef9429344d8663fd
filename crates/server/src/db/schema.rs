use sqlx::PgPool;

/// Idempotent bootstrap DDL, applied on every startup.
const INIT_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        team_name VARCHAR(255) PRIMARY KEY,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id VARCHAR(255) PRIMARY KEY,
        username VARCHAR(255) NOT NULL,
        team_name VARCHAR(255) REFERENCES teams(team_name) ON DELETE CASCADE,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pull_requests (
        pull_request_id VARCHAR(255) PRIMARY KEY,
        pull_request_name VARCHAR(255) NOT NULL,
        author_id VARCHAR(255) NOT NULL REFERENCES users(user_id),
        status VARCHAR(50) NOT NULL DEFAULT 'OPEN' CHECK (status IN ('OPEN', 'MERGED')),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        merged_at TIMESTAMPTZ
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pr_reviewers (
        pull_request_id VARCHAR(255) REFERENCES pull_requests(pull_request_id) ON DELETE CASCADE,
        reviewer_id VARCHAR(255) REFERENCES users(user_id),
        assigned_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (pull_request_id, reviewer_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_users_team_active ON users(team_name, is_active)",
    "CREATE INDEX IF NOT EXISTS idx_users_active ON users(is_active)",
    "CREATE INDEX IF NOT EXISTS idx_pr_status ON pull_requests(status)",
    "CREATE INDEX IF NOT EXISTS idx_pr_author ON pull_requests(author_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviewers_pr_id ON pr_reviewers(pull_request_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviewers_user_id ON pr_reviewers(reviewer_id)",
];

const DROP_STATEMENTS: &[&str] = &[
    "DROP TABLE IF EXISTS pr_reviewers CASCADE",
    "DROP TABLE IF EXISTS pull_requests CASCADE",
    "DROP TABLE IF EXISTS users CASCADE",
    "DROP TABLE IF EXISTS teams CASCADE",
];

pub async fn init(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in INIT_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Drops and recreates all four tables. Controlled by `RESET_DB_ON_STARTUP`.
pub async fn reset(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in DROP_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    init(pool).await
}
