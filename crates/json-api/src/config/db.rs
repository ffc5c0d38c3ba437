//! Database Config

use std::time::Duration;

use clap::Args;

use attar_app::database::{ConnectTarget, PoolSettings};

use super::ConfigError;

/// Database settings.
///
/// Either `DATABASE_URL` or the discrete host/name/user options must be given.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "DATABASE_HOST")]
    pub database_host: Option<String>,

    #[arg(long, env = "DATABASE_PORT", default_value_t = 5432)]
    pub database_port: u16,

    #[arg(long, env = "DATABASE_NAME")]
    pub database_name: Option<String>,

    #[arg(long, env = "DATABASE_USER")]
    pub database_user: Option<String>,

    #[arg(long, env = "DATABASE_PASSWORD", hide_env_values = true)]
    pub database_password: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection before failing with 503
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_SECONDS", default_value_t = 5)]
    pub acquire_timeout_seconds: u64,

    /// Apply pending migrations at startup
    #[arg(long, env = "DATABASE_RUN_MIGRATIONS", default_value_t = false)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub(crate) fn pool_settings(&self) -> Result<PoolSettings, ConfigError> {
        let target = match &self.database_url {
            Some(url) => ConnectTarget::Url(url.clone()),
            None => ConnectTarget::Parts {
                host: self
                    .database_host
                    .clone()
                    .ok_or(ConfigError::Database("DATABASE_URL or DATABASE_HOST"))?,
                port: self.database_port,
                database: self
                    .database_name
                    .clone()
                    .ok_or(ConfigError::Database("DATABASE_NAME"))?,
                username: self
                    .database_user
                    .clone()
                    .ok_or(ConfigError::Database("DATABASE_USER"))?,
                password: self.database_password.clone(),
            },
        };

        Ok(PoolSettings {
            target,
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_seconds),
        })
    }
}
