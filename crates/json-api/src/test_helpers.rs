//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{CartUuid, PopulatedCart, PopulatedLine},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
    },
};

use crate::state::State;

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_create_cart().never();
    carts.expect_get_cart().never();
    carts.expect_list_carts().never();
    carts.expect_add_lines().never();
    carts.expect_set_quantity().never();
    carts.expect_remove_line().never();
    carts.expect_replace_lines().never();
    carts.expect_clear_cart().never();

    carts
}

fn make_state(products: MockProductsService, carts: MockCartsService) -> Arc<State> {
    State::shared(AppContext {
        products: Arc::new(products),
        carts: Arc::new(carts),
    })
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(products, strict_carts_mock())))
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(strict_products_mock(), carts)))
            .push(route),
    )
}

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        title: "Keyboard".to_string(),
        category: None,
        stock: 0,
        price: 100,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_empty_cart(uuid: CartUuid) -> PopulatedCart {
    PopulatedCart {
        uuid,
        lines: vec![],
        total: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_with_line(
    uuid: CartUuid,
    product: ProductUuid,
    quantity: u64,
) -> PopulatedCart {
    let product = make_product(product);
    let line_total = product.price.saturating_mul(quantity);

    PopulatedCart {
        uuid,
        lines: vec![PopulatedLine {
            product,
            quantity,
            line_total,
        }],
        total: line_total,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
