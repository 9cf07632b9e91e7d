//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    carts::{CartsService, CatalogCartsService},
    database::{self, Db},
    operators::{OperatorsService, PgOperatorsService},
    orders::{OrdersService, PgOrdersService},
    products::{PgProductsService, ProductsService},
    reports::{PgReportsService, ReportsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub reports: Arc<dyn ReportsService>,
    pub operators: Arc<dyn OperatorsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    /// Wire every service over one shared pool.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));

        Self {
            carts: Arc::new(CatalogCartsService::new(Arc::clone(&products))),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            reports: Arc::new(PgReportsService::new(db.clone())),
            operators: Arc::new(PgOperatorsService::new(db)),
            products,
        }
    }
}
