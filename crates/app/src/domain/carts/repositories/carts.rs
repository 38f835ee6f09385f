//! Carts Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    carts::models::{Cart, CartUuid},
    products::repository::{try_into_i64, try_into_u64},
};

const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const LIST_CARTS_SQL: &str = include_str!("../sql/list_carts.sql");
const COUNT_CARTS_SQL: &str = include_str!("../sql/count_carts.sql");

#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Inserts an empty cart under the given uuid.
    async fn create_cart(&self, cart: CartUuid) -> Result<Cart, sqlx::Error>;

    /// Retrieves a single cart row.
    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, sqlx::Error>;

    /// Retrieves one page of cart rows in creation order.
    async fn list_carts(&self, limit: u64, offset: u64) -> Result<Vec<Cart>, sqlx::Error>;

    /// Counts all stored carts.
    async fn count_carts(&self) -> Result<u64, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    pool: PgPool,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn create_cart(&self, cart: CartUuid) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(CREATE_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    async fn list_carts(&self, limit: u64, offset: u64) -> Result<Vec<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(LIST_CARTS_SQL)
            .bind(try_into_i64(limit, "limit")?)
            .bind(try_into_i64(offset, "offset")?)
            .fetch_all(&self.pool)
            .await
    }

    async fn count_carts(&self) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_CARTS_SQL).fetch_one(&self.pool).await?;

        try_into_u64(count, "count")
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
