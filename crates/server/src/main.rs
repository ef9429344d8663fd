use anyhow::Context;
use server::{AppState, app, config::Config, db::schema, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing();

    let config = Config::from_env().context("failed to load configuration")?;

    tracing::info!(
        host = %config.db_host,
        port = config.db_port,
        database = %config.db_name,
        "connecting to database"
    );
    let pool = app::connect_with_retry(config.connect_options())
        .await
        .context("failed to connect to database")?;

    if config.reset_db {
        schema::reset(&pool).await.context("failed to reset database")?;
        tracing::info!("database reset completed");
    } else {
        schema::init(&pool).await.context("failed to initialize schema")?;
    }

    let state = AppState::new(pool);
    let router = routes::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "server listening");

    axum::serve(listener, router)
        .await
        .context("server exited with error")?;

    Ok(())
}
