//! Products Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::products::models::{NewProduct, Product, ProductUpdate, ProductUuid};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCTS_BY_UUIDS_SQL: &str = include_str!("sql/get_products_by_uuids.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Retrieves one page of products sorted ascending by price.
    async fn list_products(&self, limit: u64, offset: u64) -> Result<Vec<Product>, sqlx::Error>;

    /// Counts all stored products.
    async fn count_products(&self) -> Result<u64, sqlx::Error>;

    /// Retrieves a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, sqlx::Error>;

    /// Retrieves the products whose uuids appear in the given set; missing
    /// uuids are simply absent from the result.
    async fn get_products_by_uuids(
        &self,
        uuids: Vec<ProductUuid>,
    ) -> Result<Vec<Product>, sqlx::Error>;

    /// Inserts a product under the given uuid.
    async fn create_product(
        &self,
        product: ProductUuid,
        new: NewProduct,
    ) -> Result<Product, sqlx::Error>;

    /// Applies a partial update, leaving absent fields unchanged.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, sqlx::Error>;

    /// Deletes a product, returning the deleted row if it existed.
    async fn delete_product(&self, product: ProductUuid) -> Result<Option<Product>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn list_products(&self, limit: u64, offset: u64) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .bind(try_into_i64(limit, "limit")?)
            .bind(try_into_i64(offset, "offset")?)
            .fetch_all(&self.pool)
            .await
    }

    async fn count_products(&self) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL).fetch_one(&self.pool).await?;

        try_into_u64(count, "count")
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    async fn get_products_by_uuids(
        &self,
        uuids: Vec<ProductUuid>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let uuids: Vec<Uuid> = uuids.into_iter().map(ProductUuid::into_uuid).collect();

        query_as::<Postgres, Product>(GET_PRODUCTS_BY_UUIDS_SQL)
            .bind(uuids)
            .fetch_all(&self.pool)
            .await
    }

    async fn create_product(
        &self,
        product: ProductUuid,
        new: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(new.title)
            .bind(new.category)
            .bind(i32::try_from(new.stock).map_err(|e| sqlx::Error::ColumnDecode {
                index: "stock".to_string(),
                source: Box::new(e),
            })?)
            .bind(try_into_i64(new.price, "price")?)
            .fetch_one(&self.pool)
            .await
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, sqlx::Error> {
        let stock = update
            .stock
            .map(i32::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "stock".to_string(),
                source: Box::new(e),
            })?;

        let price = update
            .price
            .map(|price| try_into_i64(price, "price"))
            .transpose()?;

        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.title)
            .bind(update.category)
            .bind(stock)
            .bind(price)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price = try_into_u64(row.try_get("price")?, "price")?;

        let stock_i32: i32 = row.try_get("stock")?;

        let stock = u32::try_from(stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            category: row.try_get("category")?,
            stock,
            price,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

pub(crate) fn try_into_i64(value: u64, index: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_into_u64(value: i64, index: &str) -> Result<u64, sqlx::Error> {
    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}
