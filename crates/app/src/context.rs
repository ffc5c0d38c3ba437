//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db, PoolSettings},
    domain::{
        addresses::{AddressesService, PgAddressesService},
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService, pricing::PricingPolicy},
        products::{PgProductsService, ProductsService},
        profiles::{PgProfilesService, ProfilesService},
        tracking::{PgTrackingService, TrackingService},
    },
    health::{HealthService, PgHealthService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Everything a request handler needs, behind trait objects so tests can swap in mocks.
#[derive(Clone)]
pub struct AppContext {
    pub profiles: Arc<dyn ProfilesService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub addresses: Arc<dyn AddressesService>,
    pub orders: Arc<dyn OrdersService>,
    pub tracking: Arc<dyn TrackingService>,
    pub auth: Arc<dyn AuthService>,
    pub health: Arc<dyn HealthService>,
}

/// Settings the services are built from.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub pool: PoolSettings,

    /// HS256 secret bearer tokens are signed with.
    pub jwt_secret: String,
    pub pricing: PricingPolicy,

    /// Apply pending migrations before serving.
    pub run_migrations: bool,
}

impl AppContext {
    /// Connect the pool and build every service on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable or a migration fails.
    pub async fn connect(settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect_with(&settings.pool)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        let db = Db::new(pool.clone());

        Ok(Self {
            profiles: Arc::new(PgProfilesService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            addresses: Arc::new(PgAddressesService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), settings.pricing)),
            tracking: Arc::new(PgTrackingService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(pool, settings.jwt_secret.as_bytes())),
            health: Arc::new(PgHealthService::new(db)),
        })
    }
}
