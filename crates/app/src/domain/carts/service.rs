//! Carts service.
//!
//! Line mutations are read-modify-write: the stored lines are fetched,
//! edited in memory, and written back wholesale. Two concurrent edits of
//! the same cart can race; the last write wins.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    domain::{
        carts::{
            aggregation::populate_lines,
            errors::CartsServiceError,
            models::{Cart, CartLine, CartUuid, NewCartLine, PopulatedCart},
            repositories::{CartLinesRepository, CartsRepository},
        },
        products::{
            models::{Product, ProductUuid},
            repository::ProductsRepository,
        },
    },
    pagination::{Page, PageRequest},
};

#[derive(Clone)]
pub struct DefaultCartsService {
    carts: Arc<dyn CartsRepository>,
    lines: Arc<dyn CartLinesRepository>,
    products: Arc<dyn ProductsRepository>,
}

impl DefaultCartsService {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsRepository>,
        lines: Arc<dyn CartLinesRepository>,
        products: Arc<dyn ProductsRepository>,
    ) -> Self {
        Self {
            carts,
            lines,
            products,
        }
    }

    /// Fetches the current products referenced by the given lines, keyed by
    /// uuid. References to deleted products are simply absent from the map.
    async fn fetch_products(
        &self,
        lines: &[CartLine],
    ) -> Result<FxHashMap<ProductUuid, Product>, CartsServiceError> {
        if lines.is_empty() {
            return Ok(FxHashMap::default());
        }

        let mut seen = FxHashSet::default();

        let uuids: Vec<ProductUuid> = lines
            .iter()
            .map(|line| line.product)
            .filter(|product| seen.insert(*product))
            .collect();

        let products = self.products.get_products_by_uuids(uuids).await?;

        Ok(products
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect())
    }

    async fn populate(
        &self,
        cart: Cart,
        lines: Vec<CartLine>,
    ) -> Result<PopulatedCart, CartsServiceError> {
        let products = self.fetch_products(&lines).await?;

        let (lines, total) = populate_lines(&lines, &products);

        Ok(PopulatedCart {
            uuid: cart.uuid,
            lines,
            total,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        })
    }

    async fn save_and_populate(
        &self,
        cart: Cart,
        lines: Vec<CartLine>,
    ) -> Result<PopulatedCart, CartsServiceError> {
        self.lines.replace_lines(cart.uuid, lines.clone()).await?;

        self.populate(cart, lines).await
    }
}

/// Merges incoming lines into the stored list: a line for an already
/// referenced product increments that line's quantity, anything else is
/// appended. This is what keeps a cart at one line per distinct product.
fn merge_lines(lines: &mut Vec<CartLine>, incoming: Vec<NewCartLine>) {
    let mut index: FxHashMap<ProductUuid, usize> = lines
        .iter()
        .enumerate()
        .map(|(position, line)| (line.product, position))
        .collect();

    for new in incoming {
        if let Some(&position) = index.get(&new.product) {
            if let Some(line) = lines.get_mut(position) {
                line.quantity = line.quantity.saturating_add(new.quantity);
            }
        } else {
            index.insert(new.product, lines.len());

            lines.push(CartLine {
                product: new.product,
                quantity: new.quantity,
            });
        }
    }
}

#[async_trait]
impl CartsService for DefaultCartsService {
    async fn create_cart(&self) -> Result<PopulatedCart, CartsServiceError> {
        let cart = self.carts.create_cart(CartUuid::new()).await?;

        self.populate(cart, Vec::new()).await
    }

    async fn get_cart(&self, cart: CartUuid) -> Result<PopulatedCart, CartsServiceError> {
        let cart = self.carts.get_cart(cart).await?;
        let lines = self.lines.get_lines(cart.uuid).await?;

        self.populate(cart, lines).await
    }

    async fn list_carts(
        &self,
        request: PageRequest,
    ) -> Result<Page<PopulatedCart>, CartsServiceError> {
        let total = self.carts.count_carts().await?;

        let carts = self
            .carts
            .list_carts(request.limit, request.offset())
            .await?;

        let mut lines_by_cart: FxHashMap<CartUuid, Vec<CartLine>> = FxHashMap::default();

        let all_lines = self
            .lines
            .get_lines_for_carts(carts.iter().map(|cart| cart.uuid).collect())
            .await?;

        for (cart, line) in all_lines {
            lines_by_cart.entry(cart).or_default().push(line);
        }

        let every_line: Vec<CartLine> = lines_by_cart.values().flatten().copied().collect();
        let products = self.fetch_products(&every_line).await?;

        let items = carts
            .into_iter()
            .map(|cart| {
                let stored = lines_by_cart.remove(&cart.uuid).unwrap_or_default();
                let (lines, total) = populate_lines(&stored, &products);

                PopulatedCart {
                    uuid: cart.uuid,
                    lines,
                    total,
                    created_at: cart.created_at,
                    updated_at: cart.updated_at,
                }
            })
            .collect();

        Ok(Page::new(items, request, total))
    }

    async fn add_lines(
        &self,
        cart: CartUuid,
        new_lines: Vec<NewCartLine>,
    ) -> Result<PopulatedCart, CartsServiceError> {
        if new_lines.iter().any(|line| line.quantity < 1) {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let cart = self.carts.get_cart(cart).await?;
        let mut lines = self.lines.get_lines(cart.uuid).await?;

        merge_lines(&mut lines, new_lines);

        self.save_and_populate(cart, lines).await
    }

    async fn set_quantity(
        &self,
        cart: CartUuid,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<PopulatedCart, CartsServiceError> {
        if quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let cart = self.carts.get_cart(cart).await?;
        let mut lines = self.lines.get_lines(cart.uuid).await?;

        let line = lines
            .iter_mut()
            .find(|line| line.product == product)
            .ok_or(CartsServiceError::LineNotFound)?;

        line.quantity = quantity;

        self.save_and_populate(cart, lines).await
    }

    async fn remove_line(
        &self,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<PopulatedCart, CartsServiceError> {
        let cart = self.carts.get_cart(cart).await?;
        let mut lines = self.lines.get_lines(cart.uuid).await?;

        // Removing a line that is not present is a no-op, not an error.
        lines.retain(|line| line.product != product);

        self.save_and_populate(cart, lines).await
    }

    async fn replace_lines(
        &self,
        cart: CartUuid,
        lines: Vec<CartLine>,
    ) -> Result<PopulatedCart, CartsServiceError> {
        let cart = self.carts.get_cart(cart).await?;

        self.save_and_populate(cart, lines).await
    }

    async fn clear_cart(&self, cart: CartUuid) -> Result<PopulatedCart, CartsServiceError> {
        let cart = self.carts.get_cart(cart).await?;

        self.save_and_populate(cart, Vec::new()).await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Creates a new cart with an empty line list.
    async fn create_cart(&self) -> Result<PopulatedCart, CartsServiceError>;

    /// Retrieves a cart with its lines resolved and totalled.
    async fn get_cart(&self, cart: CartUuid) -> Result<PopulatedCart, CartsServiceError>;

    /// Retrieves one page of carts, each resolved and totalled.
    async fn list_carts(
        &self,
        request: PageRequest,
    ) -> Result<Page<PopulatedCart>, CartsServiceError>;

    /// Merges the given lines into the cart: existing product references
    /// accumulate quantity, new ones are appended.
    async fn add_lines(
        &self,
        cart: CartUuid,
        new_lines: Vec<NewCartLine>,
    ) -> Result<PopulatedCart, CartsServiceError>;

    /// Overwrites the quantity of one line. Quantities below 1 are
    /// rejected.
    async fn set_quantity(
        &self,
        cart: CartUuid,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<PopulatedCart, CartsServiceError>;

    /// Removes the line referencing the given product, if present.
    async fn remove_line(
        &self,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<PopulatedCart, CartsServiceError>;

    /// Replaces the full line list of a cart.
    async fn replace_lines(
        &self,
        cart: CartUuid,
        lines: Vec<CartLine>,
    ) -> Result<PopulatedCart, CartsServiceError>;

    /// Empties the line list of a cart. The cart itself survives.
    async fn clear_cart(&self, cart: CartUuid) -> Result<PopulatedCart, CartsServiceError>;
}
