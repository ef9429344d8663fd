use api_types::{Team, TeamMember};
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("team name already exists")]
    AlreadyExists,
}

pub struct TeamRepository;

impl TeamRepository {
    /// Inserts the team and upserts each listed member in one transaction.
    ///
    /// A member id that already belongs to another team is rebound to this
    /// team (intended policy, see DESIGN.md).
    pub async fn create(pool: &PgPool, team: &Team) -> Result<(), TeamError> {
        let mut tx = pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teams WHERE team_name = $1)")
                .bind(&team.team_name)
                .fetch_one(&mut *tx)
                .await?;
        if exists {
            return Err(TeamError::AlreadyExists);
        }

        sqlx::query("INSERT INTO teams (team_name) VALUES ($1)")
            .bind(&team.team_name)
            .execute(&mut *tx)
            .await
            .map_err(unique_violation_to_exists)?;

        for member in &team.members {
            sqlx::query(
                r#"
                INSERT INTO users (user_id, username, team_name, is_active)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id)
                DO UPDATE SET username = $2, team_name = $3, is_active = $4
                "#,
            )
            .bind(&member.user_id)
            .bind(&member.username)
            .bind(&team.team_name)
            .bind(member.is_active)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Returns `None` when the team has no members, even if the team row
    /// exists (preserved behavior, see DESIGN.md).
    pub async fn find_by_name(pool: &PgPool, team_name: &str) -> Result<Option<Team>, TeamError> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT user_id, username, is_active
            FROM users
            WHERE team_name = $1
            "#,
        )
        .bind(team_name)
        .fetch_all(pool)
        .await?;

        if members.is_empty() {
            return Ok(None);
        }

        Ok(Some(Team {
            team_name: team_name.to_string(),
            members,
        }))
    }
}

// The pre-check is an optimization; the primary key is the authoritative
// guard against concurrent creations of the same team.
fn unique_violation_to_exists(error: sqlx::Error) -> TeamError {
    match &error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => TeamError::AlreadyExists,
        _ => TeamError::Database(error),
    }
}
