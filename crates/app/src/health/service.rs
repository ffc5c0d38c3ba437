//! Health service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::query_scalar;

use crate::{database::Db, health::HealthServiceError};

const PING_SQL: &str = include_str!("sql/ping.sql");

/// Checks that a pooled connection can be checked out and answers a query.
#[derive(Debug, Clone)]
pub struct PgHealthService {
    db: Db,
}

impl PgHealthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthService for PgHealthService {
    async fn check_database(&self) -> Result<(), HealthServiceError> {
        let _one: i32 = query_scalar(PING_SQL).fetch_one(self.db.pool()).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Round-trip a trivial query through the pool.
    async fn check_database(&self) -> Result<(), HealthServiceError>;
}
