//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductUpdate, ProductUuid},
        repository::ProductsRepository,
    },
    pagination::{Page, PageRequest},
};

#[derive(Clone)]
pub struct DefaultProductsService {
    repository: Arc<dyn ProductsRepository>,
}

impl DefaultProductsService {
    #[must_use]
    pub fn new(repository: Arc<dyn ProductsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductsService for DefaultProductsService {
    async fn list_products(
        &self,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductsServiceError> {
        let total = self.repository.count_products().await?;

        let items = self
            .repository
            .list_products(request.limit, request.offset())
            .await?;

        Ok(Page::new(items, request, total))
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        Ok(self.repository.get_product(product).await?)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let new = NewProduct {
            title: non_blank(product.title).ok_or(ProductsServiceError::MissingRequiredData)?,
            category: product.category.and_then(non_blank),
            ..product
        };

        let created = self
            .repository
            .create_product(ProductUuid::new(), new)
            .await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let title = match update.title {
            Some(title) => Some(non_blank(title).ok_or(ProductsServiceError::InvalidData)?),
            None => None,
        };

        let category = match update.category {
            Some(category) => Some(non_blank(category).ok_or(ProductsServiceError::InvalidData)?),
            None => None,
        };

        let update = ProductUpdate {
            title,
            category,
            ..update
        };

        Ok(self.repository.update_product(product, update).await?)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        self.repository
            .delete_product(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves one page of products sorted ascending by price.
    async fn list_products(
        &self,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product. The trimmed title must be non-empty.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Applies a partial update to a product. Absent fields are left
    /// unchanged; a present but blank title or category is rejected.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product, returning the deleted row.
    async fn delete_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;
}
