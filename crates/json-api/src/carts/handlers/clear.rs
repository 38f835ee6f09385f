//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::errors::into_status_error, carts::get::CartResponse, internal::*, state::State,
};

/// Clear Cart Handler
///
/// Empties the line list of a cart. The cart itself survives.
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.shared_state::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .clear_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{CartsServiceError, MockCartsService, models::CartUuid};

    use crate::test_helpers::{carts_service, make_empty_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("carts/{cart}").delete(handler))
    }

    #[tokio::test]
    async fn test_clear_returns_empty_cart() -> TestResult {
        let uuid = CartUuid::new();
        let cart = make_empty_cart(uuid);

        let mut repo = MockCartsService::new();

        repo.expect_clear_cart()
            .once()
            .withf(move |c| *c == uuid)
            .return_once(move |_| Ok(cart));

        repo.expect_get_cart().never();
        repo.expect_remove_line().never();

        let mut res = TestClient::delete(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(repo))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.lines.is_empty(), "all lines are gone");
        assert_eq!(body.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_missing_cart_returns_404() -> TestResult {
        let uuid = CartUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_clear_cart()
            .once()
            .withf(move |c| *c == uuid)
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
