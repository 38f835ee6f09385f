//! Add Cart Lines Handler

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

use storefront_app::domain::carts::models::NewCartLine;

use crate::{
    carts::errors::into_status_error, carts::get::CartResponse, internal::*, state::State,
};

/// Add Cart Lines Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddLinesRequest {
    pub products: Vec<NewLineRequest>,
}

/// One line to add
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NewLineRequest {
    pub product: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: u64,
}

fn default_quantity() -> u64 {
    1
}

impl From<NewLineRequest> for NewCartLine {
    fn from(line: NewLineRequest) -> Self {
        NewCartLine {
            product: line.product.into(),
            quantity: line.quantity,
        }
    }
}

/// Add Cart Lines Handler
///
/// Merges the requested lines into the cart: a line for an already
/// referenced product adds to its quantity, anything else is appended.
#[endpoint(
    tags("carts"),
    summary = "Add Cart Lines",
    responses(
        (status_code = StatusCode::OK, description = "Lines merged into the cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<AddLinesRequest>,
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
        .add_lines(cart.into_inner().into(), lines)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService, models::CartUuid},
        products::models::ProductUuid,
    };

    use crate::test_helpers::{carts_service, make_cart_with_line};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(
            repo,
            Router::with_path("carts/{cart}/products").post(handler),
        )
    }

    #[tokio::test]
    async fn test_add_merges_lines() -> TestResult {
        let uuid = CartUuid::new();
        let product = ProductUuid::new();
        let cart = make_cart_with_line(uuid, product, 5);

        let mut repo = MockCartsService::new();

        repo.expect_add_lines()
            .once()
            .withf(move |c, lines| {
                *c == uuid
                    && lines.as_slice()
                        == [NewCartLine {
                            product,
                            quantity: 3,
                        }]
            })
            .return_once(move |_, _| Ok(cart));

        repo.expect_get_cart().never();
        repo.expect_replace_lines().never();

        let mut res = TestClient::post(format!("http://example.com/carts/{uuid}/products"))
            .json(&json!({ "products": [{ "product": product.into_uuid(), "quantity": 3 }] }))
            .send(&make_service(repo))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.lines.len(), 1, "the merged cart has a single line");
        assert_eq!(body.lines[0].quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_quantity_defaults_to_one() -> TestResult {
        let uuid = CartUuid::new();
        let product = ProductUuid::new();
        let cart = make_cart_with_line(uuid, product, 1);

        let mut repo = MockCartsService::new();

        repo.expect_add_lines()
            .once()
            .withf(move |_, lines| {
                lines.as_slice()
                    == [NewCartLine {
                        product,
                        quantity: 1,
                    }]
            })
            .return_once(move |_, _| Ok(cart));

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/products"))
            .json(&json!({ "products": [{ "product": product.into_uuid() }] }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_zero_quantity_returns_400() -> TestResult {
        let uuid = CartUuid::new();
        let product = ProductUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_add_lines()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/products"))
            .json(&json!({ "products": [{ "product": product.into_uuid(), "quantity": 0 }] }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_missing_cart_returns_404() -> TestResult {
        let uuid = CartUuid::new();
        let product = ProductUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_add_lines()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/products"))
            .json(&json!({ "products": [{ "product": product.into_uuid(), "quantity": 1 }] }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
