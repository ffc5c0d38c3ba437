//! App Router

use salvo::Router;

use crate::{addresses, auth, carts, orders, products, tracking};

/// Catalog reads that need no credentials.
fn public_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(Router::with_path("{product}").get(products::get::handler))
}

fn products_router() -> Router {
    Router::with_path("products")
        .post(products::create::handler)
        .push(
            Router::with_path("{product}")
                .put(products::update::handler)
                .delete(products::delete::handler)
                .push(Router::with_path("variants").post(products::variants::handler))
                .push(Router::with_path("restock").post(products::restock::handler)),
        )
}

fn cart_router() -> Router {
    Router::with_path("cart")
        .get(carts::get::handler)
        .delete(carts::clear::handler)
        .push(Router::with_path("merge").post(carts::merge::handler))
        .push(
            Router::with_path("items").post(carts::add_item::handler).push(
                Router::with_path("{item}")
                    .patch(carts::update_item::handler)
                    .delete(carts::remove_item::handler),
            ),
        )
}

fn addresses_router() -> Router {
    Router::with_path("addresses")
        .get(addresses::index::handler)
        .post(addresses::create::handler)
        .push(
            Router::with_path("{address}")
                .delete(addresses::delete::handler)
                .push(Router::with_path("default").put(addresses::set_default::handler)),
        )
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .get(orders::index::handler)
        .post(orders::create::handler)
        .push(
            Router::with_path("{order}")
                .get(orders::get::handler)
                .push(Router::with_path("status").patch(orders::update_status::handler))
                .push(
                    Router::with_path("tracking")
                        .get(tracking::index::handler)
                        .post(tracking::create::handler)
                        .patch(orders::update_tracking::handler),
                ),
        )
}

/// Everything under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api").push(public_router()).push(
        Router::new()
            .hoop(auth::middleware::handler)
            .push(products_router())
            .push(cart_router())
            .push(addresses_router())
            .push(orders_router()),
    )
}
