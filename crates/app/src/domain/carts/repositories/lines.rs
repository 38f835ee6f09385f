//! Cart Lines Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Row, postgres::PgRow, query};
use uuid::Uuid;

use crate::domain::{
    carts::models::{CartLine, CartUuid},
    products::repository::{try_into_i64, try_into_u64},
};

const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const GET_LINES_FOR_CARTS_SQL: &str = include_str!("../sql/get_lines_for_carts.sql");
const DELETE_CART_LINES_SQL: &str = include_str!("../sql/delete_cart_lines.sql");
const INSERT_CART_LINE_SQL: &str = include_str!("../sql/insert_cart_line.sql");
const TOUCH_CART_SQL: &str = include_str!("../sql/touch_cart.sql");

#[automock]
#[async_trait]
pub trait CartLinesRepository: Send + Sync {
    /// Retrieves the stored lines of one cart in position order.
    async fn get_lines(&self, cart: CartUuid) -> Result<Vec<CartLine>, sqlx::Error>;

    /// Retrieves the stored lines of several carts at once, keyed by cart.
    async fn get_lines_for_carts(
        &self,
        carts: Vec<CartUuid>,
    ) -> Result<Vec<(CartUuid, CartLine)>, sqlx::Error>;

    /// Overwrites the full line list of a cart and touches its
    /// `updated_at`, all in one transaction.
    async fn replace_lines(&self, cart: CartUuid, lines: Vec<CartLine>)
    -> Result<(), sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgCartLinesRepository {
    pool: PgPool,
}

impl PgCartLinesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartLinesRepository for PgCartLinesRepository {
    async fn get_lines(&self, cart: CartUuid) -> Result<Vec<CartLine>, sqlx::Error> {
        query(GET_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .try_map(|row: PgRow| line_from_row(&row))
            .fetch_all(&self.pool)
            .await
    }

    async fn get_lines_for_carts(
        &self,
        carts: Vec<CartUuid>,
    ) -> Result<Vec<(CartUuid, CartLine)>, sqlx::Error> {
        let carts: Vec<Uuid> = carts.into_iter().map(CartUuid::into_uuid).collect();

        query(GET_LINES_FOR_CARTS_SQL)
            .bind(carts)
            .try_map(|row: PgRow| {
                let cart = CartUuid::from_uuid(row.try_get("cart_uuid")?);

                Ok((cart, line_from_row(&row)?))
            })
            .fetch_all(&self.pool)
            .await
    }

    async fn replace_lines(
        &self,
        cart: CartUuid,
        lines: Vec<CartLine>,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(DELETE_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .execute(&mut *tx)
            .await?;

        for (position, line) in lines.iter().enumerate() {
            let position = i64::try_from(position).map_err(|e| sqlx::Error::ColumnDecode {
                index: "position".to_string(),
                source: Box::new(e),
            })?;

            query(INSERT_CART_LINE_SQL)
                .bind(cart.into_uuid())
                .bind(line.product.into_uuid())
                .bind(try_into_i64(line.quantity, "quantity")?)
                .bind(position)
                .execute(&mut *tx)
                .await?;
        }

        query(TOUCH_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }
}

fn line_from_row(row: &PgRow) -> Result<CartLine, sqlx::Error> {
    Ok(CartLine {
        product: row.try_get::<Uuid, _>("product_uuid")?.into(),
        quantity: try_into_u64(row.try_get("quantity")?, "quantity")?,
    })
}
