//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::{domain::products::models::Product, pagination::Page};

use crate::{
    internal::*, pagination::page_request, products::errors::into_status_error,
    products::get::ProductResponse, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsPageResponse {
    /// The products on this page, cheapest first
    pub products: Vec<ProductResponse>,

    /// The current page number
    pub page: u64,

    /// Whether a previous page exists
    pub has_prev: bool,

    /// Whether a next page exists
    pub has_next: bool,

    /// The previous page number, when one exists
    pub prev_page: Option<u64>,

    /// The next page number, when one exists
    pub next_page: Option<u64>,
}

impl From<Page<Product>> for ProductsPageResponse {
    fn from(page: Page<Product>) -> Self {
        ProductsPageResponse {
            products: page.items.into_iter().map(Into::into).collect(),
            page: page.page,
            has_prev: page.has_prev,
            has_next: page.has_next,
            prev_page: page.prev_page,
            next_page: page.next_page,
        }
    }
}

/// Product Index Handler
///
/// Returns one page of products sorted ascending by price. The page is
/// selected with the `numPage` and `limit` query parameters.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsPageResponse>, StatusError> {
    let state = depot.shared_state::<Arc<State>>()?;

    let page = state
        .app
        .products
        .list_products(page_request(req))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
