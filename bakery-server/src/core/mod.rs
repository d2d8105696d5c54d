//! Core server infrastructure: configuration, shared state, HTTP server.

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, PriceSource};
pub use server::{Server, build_app, build_router};
pub use state::ServerState;
