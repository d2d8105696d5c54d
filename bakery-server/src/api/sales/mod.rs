//! Sales API module
//!
//! The anonymous checkout and receipt download are public; everything else
//! requires a staff token. Listing all sales additionally requires admin.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sales", sale_routes())
}

fn sale_routes() -> Router<ServerState> {
    let staff = Router::new()
        .route("/", post(handler::create).get(handler::list_all))
        .route("/today", get(handler::today))
        .route("/stats", get(handler::stats))
        .route_layer(middleware::from_fn(require_staff));

    Router::new()
        .route("/customer", post(handler::create_customer))
        .route("/{id}/receipt", get(handler::receipt))
        .merge(staff)
}
