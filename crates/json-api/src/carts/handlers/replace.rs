//! Replace Cart Lines Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::CartLine;

use crate::{
    carts::errors::into_status_error, carts::get::CartResponse, internal::*, state::State,
};

/// Replace Cart Lines Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReplaceLinesRequest {
    pub products: Vec<LineRequest>,
}

/// One requested line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineRequest {
    pub product: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: u64,
}

fn default_quantity() -> u64 {
    1
}

impl From<LineRequest> for CartLine {
    fn from(line: LineRequest) -> Self {
        CartLine {
            product: line.product.into(),
            quantity: line.quantity,
        }
    }
}

/// Replace Cart Lines Handler
///
/// Overwrites the full line list of a cart with the request body.
#[endpoint(
    tags("carts"),
    summary = "Replace Cart Lines",
    responses(
        (status_code = StatusCode::OK, description = "Cart lines replaced"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<ReplaceLinesRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.shared_state::<Arc<State>>()?;

    let lines = json
        .into_inner()
        .products
        .into_iter()
        .map(Into::into)
        .collect();

    let cart = state
        .app
        .carts
        .replace_lines(cart.into_inner().into(), lines)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
