use std::env;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable `{0}`")]
    InvalidVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: SecretString,
    pub db_name: String,
    pub port: u16,
    pub reset_db: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_host = env_or("DB_HOST", "postgres");
        let db_port = env_or("DB_PORT", "5432")
            .parse()
            .map_err(|_| ConfigError::InvalidVar("DB_PORT"))?;
        let db_user = env_or("DB_USER", "postgres");
        let db_password = SecretString::new(env_or("DB_PASSWORD", "postgres").into());
        let db_name = env_or("DB_NAME", "pr_reviewer");

        let port = env_or("PORT", "8080")
            .parse()
            .map_err(|_| ConfigError::InvalidVar("PORT"))?;

        let reset_db = env_or("RESET_DB_ON_STARTUP", "true") == "true";

        Ok(Self {
            db_host,
            db_port,
            db_user,
            db_password,
            db_name,
            port,
            reset_db,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(self.db_password.expose_secret())
            .database(&self.db_name)
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}
