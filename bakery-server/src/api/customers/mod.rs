//! Customer accounts API module
//!
//! Registration and login are public; the profile routes require a
//! customer token.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_customer;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", customer_routes())
}

fn customer_routes() -> Router<ServerState> {
    let protected = Router::new()
        .route("/profile", get(handler::profile).put(handler::update_profile))
        .route_layer(middleware::from_fn(require_customer));

    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .merge(protected)
}
