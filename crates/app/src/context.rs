//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database,
    domain::{
        carts::{
            CartsService, DefaultCartsService,
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        products::{
            DefaultProductsService, ProductsService, repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
}

impl AppContext {
    /// Build application context from a database URL, running any pending
    /// migrations on the way up.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to the database or migrating it
    /// fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let products_repository = Arc::new(PgProductsRepository::new(pool.clone()));

        Ok(Self {
            products: Arc::new(DefaultProductsService::new(products_repository.clone())),
            carts: Arc::new(DefaultCartsService::new(
                Arc::new(PgCartsRepository::new(pool.clone())),
                Arc::new(PgCartLinesRepository::new(pool)),
                products_repository,
            )),
        })
    }
}
