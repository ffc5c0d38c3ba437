//! Server configuration module

use clap::Parser;
use thiserror::Error;

use attar_app::context::AppSettings;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    pricing::PricingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod pricing;
pub(crate) mod server;

/// Configuration that parsed but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] clap::Error),

    #[error("DIRECT_LOGIN_ENABLED must not be set when APP_ENV is production")]
    DirectLoginInProduction,

    #[error("JWT_SECRET must not be empty")]
    EmptyJwtSecret,

    #[error("database configuration is incomplete: {0}")]
    Database(&'static str),
}

/// Attar JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "attar-json", about = "Attar storefront JSON API server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bearer token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Checkout pricing settings.
    #[command(flatten)]
    pub pricing: PricingConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed or is unsafe to run with.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        let config = Self::try_parse()?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.direct_login_enabled && self.server.is_production() {
            return Err(ConfigError::DirectLoginInProduction);
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::EmptyJwtSecret);
        }

        self.database.pool_settings()?;

        Ok(())
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for building the app context.
    ///
    /// # Errors
    ///
    /// Returns an error when neither a database URL nor a complete set of parts is configured.
    pub fn app_settings(&self) -> Result<AppSettings, ConfigError> {
        Ok(AppSettings {
            pool: self.database.pool_settings()?,
            jwt_secret: self.auth.jwt_secret.clone(),
            pricing: self.pricing.policy(),
            run_migrations: self.database.run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn parse(args: &[&str]) -> Result<ServerConfig, clap::Error> {
        ServerConfig::try_parse_from(
            ["attar-json", "--jwt-secret", "secret"]
                .iter()
                .chain(args),
        )
    }

    #[test]
    fn direct_login_is_refused_in_production() -> TestResult {
        let config = parse(&[
            "--database-url",
            "postgres://localhost/attar",
            "--app-env",
            "production",
            "--direct-login-enabled",
        ])?;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::DirectLoginInProduction)
        ));

        Ok(())
    }

    #[test]
    fn direct_login_defaults_to_disabled() -> TestResult {
        let config = parse(&["--database-url", "postgres://localhost/attar"])?;

        assert!(!config.auth.direct_login_enabled);
        assert!(config.validate().is_ok());

        Ok(())
    }

    #[test]
    fn missing_database_settings_are_rejected() -> TestResult {
        let config = parse(&["--database-host", "db.internal"])?;

        assert!(matches!(config.validate(), Err(ConfigError::Database(_))));

        Ok(())
    }
}
