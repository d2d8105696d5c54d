//! Bakery POS backend server
//!
//! REST API over an embedded SurrealDB store:
//!
//! - **Authentication** (`auth`): JWT + Argon2 for staff and customer accounts
//! - **Database** (`db`): embedded SurrealDB models and repositories
//! - **Sale processing** (`sales`): atomic stock check-and-decrement
//! - **HTTP API** (`api`): RESTful routers, one module per resource
//! - **Reporting** (`reporting`): receipt and sales-report PDFs
//!
//! # Module structure
//!
//! ```text
//! bakery-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT auth, middleware
//! ├── services/      # captcha store
//! ├── api/           # HTTP routes and handlers
//! ├── sales/         # sale transaction processor
//! ├── reporting/     # PDF rendering
//! ├── utils/         # errors, logging, validation, time
//! └── db/            # database layer
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod reporting;
pub mod sales;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, PriceSource, Server, ServerState};
pub use sales::{SaleActor, SaleProcessor};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging. Call once at process start.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    ____        __
   / __ )____ _/ /_____  _______  __
  / __  / __ `/ //_/ _ \/ ___/ / / /
 / /_/ / /_/ / ,< /  __/ /  / /_/ /
/_____/\__,_/_/|_|\___/_/   \__, /
    ____  ____  _____      /____/
   / __ \/ __ \/ ___/
  / /_/ / / / /\__ \
 / ____/ /_/ /___/ /
/_/    \____//____/
    "#
    );
}
