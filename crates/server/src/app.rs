use std::time::Duration;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

const MAX_CONNECT_ATTEMPTS: u32 = 10;

/// Bounded startup retry loop: 10 attempts with linearly increasing backoff
/// (attempt x 2s). This is the only retry policy in the system; request
/// handling never retries.
pub async fn connect_with_retry(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 1;
    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(error) if attempt < MAX_CONNECT_ATTEMPTS => {
                let backoff = Duration::from_secs(u64::from(attempt) * 2);
                tracing::warn!(
                    %error,
                    attempt,
                    max_attempts = MAX_CONNECT_ATTEMPTS,
                    backoff_secs = backoff.as_secs(),
                    "database connection failed, retrying"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
