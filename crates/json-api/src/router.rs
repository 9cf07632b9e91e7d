//! App Router

use salvo::Router;

use crate::{auth, carts, categories, orders, products, reports};

/// Routes that require an authenticated operator.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(products_router())
        .push(Router::with_path("categories").get(categories::handler))
        .push(carts_router())
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("reports")
                .push(Router::with_path("inventory").get(reports::inventory::handler))
                .push(Router::with_path("low-stock").get(reports::low_stock::handler))
                .push(Router::with_path("sales/{kind}").get(reports::sales::handler)),
        )
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .post(products::create::handler)
        .push(
            Router::with_path("{product}")
                .get(products::get::handler)
                .put(products::update::handler)
                .delete(products::delete::handler)
                .push(Router::with_path("stock").post(products::stock::handler)),
        )
}

fn carts_router() -> Router {
    Router::with_path("carts").post(carts::create::handler).push(
        Router::with_path("{cart}")
            .get(carts::get::handler)
            .delete(carts::delete::handler)
            .push(Router::with_path("checkout").post(carts::checkout::handler))
            .push(
                Router::with_path("items")
                    .post(carts::items::create::handler)
                    .delete(carts::items::clear::handler)
                    .push(
                        Router::with_path("{index}")
                            .put(carts::items::update::handler)
                            .delete(carts::items::delete::handler),
                    ),
            ),
    )
}
