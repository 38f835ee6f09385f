//! Get Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{PopulatedCart, PopulatedLine};

use crate::{
    carts::errors::into_status_error, internal::*, products::get::ProductResponse, state::State,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The resolvable lines of the cart
    pub lines: Vec<CartLineResponse>,

    /// The sum of all line totals
    pub total: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<PopulatedCart> for CartResponse {
    fn from(cart: PopulatedCart) -> Self {
        CartResponse {
            uuid: cart.uuid.into_uuid(),
            lines: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            total: cart.total,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The product this line refers to
    pub product: ProductResponse,

    /// The number of units in the line
    pub quantity: u64,

    /// The product price multiplied by the quantity
    pub line_total: u64,
}

impl From<PopulatedLine> for CartLineResponse {
    fn from(line: PopulatedLine) -> Self {
        Self {
            product: line.product.into(),
            quantity: line.quantity,
            line_total: line.line_total,
        }
    }
}

/// Get Cart Handler
///
/// Returns a cart with its lines resolved against the current products.
#[endpoint(tags("carts"), summary = "Get Cart")]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.shared_state::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .get_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
