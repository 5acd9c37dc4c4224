//! App Router

use salvo::Router;

use crate::{admin, categories, orders, payments, products, search};

/// Storefront routes. Reads and checkout are public; catalog writes,
/// order listing and payment status changes need the admin token.
pub fn app_router() -> Router {
    Router::new().push(public_router()).push(admin_router())
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(Router::with_path("{slug}").get(categories::get::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("featured").get(products::featured::handler))
                .push(Router::with_path("by_category").get(products::by_category::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("orders")
                .post(orders::create::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("payments")
                .post(payments::create::handler)
                .push(Router::with_path("{payment}").get(payments::get::handler)),
        )
        .push(
            Router::with_path("search")
                .get(search::index::handler)
                .push(Router::with_path("autocomplete").get(search::autocomplete::handler))
                .push(Router::with_path("statistics").get(search::statistics::handler)),
        )
}

fn admin_router() -> Router {
    Router::new()
        .hoop(admin::middleware::handler)
        .push(
            Router::with_path("categories")
                .post(categories::create::handler)
                .push(Router::with_path("{slug}").delete(categories::delete::handler)),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(Router::with_path("orders").get(orders::index::handler))
        .push(
            Router::with_path("payments/{payment}/status").put(payments::status::handler),
        )
}
