//! Remove Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::errors::into_status_error, carts::get::CartResponse, internal::*, state::State,
};

/// Remove Cart Line Handler
///
/// Removes the line referencing the given product. Removing a line that
/// is not present leaves the cart unchanged.
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Line",
    responses(
        (status_code = StatusCode::OK, description = "Line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.shared_state::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .remove_line(cart.into_inner().into(), product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService, models::CartUuid},
        products::models::ProductUuid,
    };

    use crate::test_helpers::{carts_service, make_empty_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(
            repo,
            Router::with_path("carts/{cart}/products/{product}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_line_success() -> TestResult {
        let uuid = CartUuid::new();
        let product = ProductUuid::new();
        let cart = make_empty_cart(uuid);

        let mut repo = MockCartsService::new();

        repo.expect_remove_line()
            .once()
            .withf(move |c, p| *c == uuid && *p == product)
            .return_once(move |_, _| Ok(cart));

        repo.expect_get_cart().never();
        repo.expect_clear_cart().never();

        let mut res = TestClient::delete(format!(
            "http://example.com/carts/{uuid}/products/{product}"
        ))
        .send(&make_service(repo))
        .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.lines.is_empty(), "the removed line is gone");

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_line_missing_cart_returns_404() -> TestResult {
        let uuid = CartUuid::new();
        let product = ProductUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_remove_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/carts/{uuid}/products/{product}"
        ))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_line_invalid_uuid_returns_400() -> TestResult {
        let uuid = CartUuid::new();

        let res = TestClient::delete(format!("http://example.com/carts/{uuid}/products/123"))
            .send(&make_service(MockCartsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
