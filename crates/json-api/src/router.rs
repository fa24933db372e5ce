//! App Router

use salvo::Router;

use crate::{auth, healthcheck, menu_items, observability::metrics_handler, orders, profiles};

/// Every API route. Reading the menu and signing in are public; everything else needs a session.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("auth/register").post(auth::register::handler))
        .push(Router::with_path("auth/login").post(auth::login::handler))
        .push(
            Router::with_path("menu-items")
                .get(menu_items::index::handler)
                .push(Router::with_path("{id}").get(menu_items::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("auth/logout").post(auth::logout::handler))
                .push(
                    Router::with_path("menu-items")
                        .post(menu_items::create::handler)
                        .push(
                            Router::with_path("{id}")
                                .put(menu_items::update::handler)
                                .delete(menu_items::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .push(Router::with_path("place_order").post(orders::place::handler))
                        .push(Router::with_path("{id}").get(orders::get::handler)),
                )
                .push(
                    Router::with_path("user-profiles")
                        .get(profiles::index::handler)
                        .push(Router::with_path("me").get(profiles::me::handler))
                        .push(
                            Router::with_path("{id}")
                                .get(profiles::get::handler)
                                .push(
                                    Router::with_path("add_funds").post(profiles::add_funds::handler),
                                )
                                .push(Router::with_path("ledger").get(profiles::ledger::handler)),
                        ),
                ),
        )
}
