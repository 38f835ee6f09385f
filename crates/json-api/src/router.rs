//! App Router

use salvo::Router;

use crate::{carts, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("carts")
                .get(carts::index::handler)
                .post(carts::create::handler)
                .push(
                    Router::with_path("{cart}")
                        .get(carts::get::handler)
                        .put(carts::replace::handler)
                        .delete(carts::clear::handler)
                        .push(
                            Router::with_path("products")
                                .post(carts::lines::add::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(carts::lines::set_quantity::handler)
                                        .delete(carts::lines::remove::handler),
                                ),
                        ),
                ),
        )
}
