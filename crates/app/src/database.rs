//! Database connection management

use std::{future::Future, pin::Pin, time::Duration};

use sqlx::{
    PgPool, Postgres, Transaction,
    migrate::{MigrateError, Migrator},
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::{debug, warn};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Default number of pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default time a caller waits for a pooled connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Boxed future returned by [`Db::with_transaction`] closures.
pub type TransactionFuture<'t, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 't>>;

/// Where and how to connect.
#[derive(Debug, Clone)]
pub enum ConnectTarget {
    /// A single `postgres://` connection string.
    Url(String),

    /// Discrete connection parameters.
    Parts {
        host: String,
        port: u16,
        database: String,
        username: String,
        password: Option<String>,
    },
}

/// Pool sizing and connection settings.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub target: ConnectTarget,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl PoolSettings {
    /// Settings for a connection string with default pool sizing.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            target: ConnectTarget::Url(url.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.target {
            ConnectTarget::Url(url) => url.parse(),
            ConnectTarget::Parts {
                host,
                port,
                database,
                username,
                password,
            } => {
                let options = PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .database(database)
                    .username(username);

                Ok(match password {
                    Some(password) => options.password(password),
                    None => options,
                })
            }
        }
    }
}

/// Process-wide handle on the bounded connection pool.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for repositories that run outside a transaction.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check out a connection and begin a transaction.
    ///
    /// The transaction rolls back if it is dropped without being committed.
    ///
    /// # Errors
    ///
    /// Returns [`sqlx::Error::PoolTimedOut`] when no connection becomes available within the
    /// acquisition timeout, or any error raised while starting the transaction.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Run `work` inside a single transaction.
    ///
    /// Commits when `work` returns `Ok`; rolls back and returns the error otherwise, so partial
    /// writes are never visible to other connections.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a converted [`sqlx::Error`] when beginning or
    /// committing the transaction fails.
    pub async fn with_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: for<'t> FnOnce(&'t mut Transaction<'static, Postgres>) -> TransactionFuture<'t, T, E>
            + Send,
        T: Send,
        E: From<sqlx::Error> + Send,
    {
        let mut tx = self.begin().await?;

        match work(&mut tx).await {
            Ok(value) => {
                tx.commit().await?;

                Ok(value)
            }
            Err(error) => {
                if let Err(source) = tx.rollback().await {
                    warn!("failed to roll back transaction: {source}");
                }

                debug!("transaction rolled back");

                Err(error)
            }
        }
    }
}

/// Connect to `PostgreSQL` with default pool sizing.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect_with(&PoolSettings::from_url(database_url)).await
}

/// Connect to `PostgreSQL` with explicit pool settings.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the connection cannot be established.
pub async fn connect_with(settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(settings.connect_options()?)
        .await
}

/// Apply any pending schema migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    #[test]
    fn parts_target_builds_connect_options() -> TestResult {
        let settings = PoolSettings {
            target: ConnectTarget::Parts {
                host: "db.internal".to_string(),
                port: 6543,
                database: "attar".to_string(),
                username: "attar_app".to_string(),
                password: Some("secret".to_string()),
            },
            max_connections: 4,
            acquire_timeout: Duration::from_millis(250),
        };

        let options = settings.connect_options()?;

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("attar"));
        assert_eq!(options.get_username(), "attar_app");

        Ok(())
    }

    #[test]
    fn malformed_url_is_rejected() {
        let settings = PoolSettings::from_url("not a url");

        assert!(settings.connect_options().is_err());
    }

    #[tokio::test]
    async fn with_transaction_commits_on_success() -> TestResult {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        db.with_transaction(|tx| {
            Box::pin(async move {
                sqlx::query("CREATE TABLE committed_marker (id INTEGER)")
                    .execute(&mut **tx)
                    .await?;

                Ok::<_, sqlx::Error>(())
            })
        })
        .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM committed_marker")
            .fetch_one(test_db.pool())
            .await?;

        assert_eq!(count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn with_transaction_rolls_back_on_error() -> TestResult {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let result = db
            .with_transaction(|tx| {
                Box::pin(async move {
                    sqlx::query("CREATE TABLE rolled_back_marker (id INTEGER)")
                        .execute(&mut **tx)
                        .await?;

                    Err::<(), sqlx::Error>(sqlx::Error::RowNotFound)
                })
            })
            .await;

        assert!(matches!(result, Err(sqlx::Error::RowNotFound)));

        let exists: bool = sqlx::query_scalar("SELECT to_regclass('rolled_back_marker') IS NOT NULL")
            .fetch_one(test_db.pool())
            .await?;

        assert!(!exists, "table created inside a failed transaction must not survive");

        Ok(())
    }

    #[tokio::test]
    async fn exhausted_pool_times_out() -> TestResult {
        let test_db = TestDb::new().await;

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_millis(100))
            .connect(&test_db.superuser_url)
            .await?;

        let db = Db::new(pool);
        let _held = db.begin().await?;

        let result = db.begin().await;

        assert!(
            matches!(result, Err(sqlx::Error::PoolTimedOut)),
            "expected PoolTimedOut, got {result:?}"
        );

        Ok(())
    }
}
