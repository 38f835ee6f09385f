//! Cart Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::{domain::carts::models::PopulatedCart, pagination::Page};

use crate::{
    carts::errors::into_status_error, carts::get::CartResponse, internal::*,
    pagination::page_request, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartsPageResponse {
    /// The carts on this page, each with its lines resolved
    pub carts: Vec<CartResponse>,

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

impl From<Page<PopulatedCart>> for CartsPageResponse {
    fn from(page: Page<PopulatedCart>) -> Self {
        CartsPageResponse {
            carts: page.items.into_iter().map(Into::into).collect(),
            page: page.page,
            has_prev: page.has_prev,
            has_next: page.has_next,
            prev_page: page.prev_page,
            next_page: page.next_page,
        }
    }
}

/// Cart Index Handler
///
/// Returns one page of carts, selected with the `numPage` and `limit`
/// query parameters.
#[endpoint(tags("carts"), summary = "List Carts")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartsPageResponse>, StatusError> {
    let state = depot.shared_state::<Arc<State>>()?;

    let page = state
        .app
        .carts
        .list_carts(page_request(req))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
