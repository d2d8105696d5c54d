//! Statistics API module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{require_admin, require_staff};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stats", stats_routes())
}

fn stats_routes() -> Router<ServerState> {
    let admin = Router::new()
        .route("/sales-by-product", get(handler::sales_by_product))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/sales-history", get(handler::sales_history))
        .route_layer(middleware::from_fn(require_staff))
        .merge(admin)
}
