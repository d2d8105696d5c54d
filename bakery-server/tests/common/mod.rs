//! Shared test fixtures: a tempdir-backed server state and catalog seeding.

use bakery_server::db::models::{Product, ProductCreate};
use bakery_server::db::repository::ProductRepository;
use bakery_server::{Config, ServerState};
use tempfile::TempDir;

/// Fresh server state over a temporary database directory. Keep the
/// returned `TempDir` alive for the duration of the test.
pub async fn test_state() -> (ServerState, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("failed to initialize server state");
    (state, dir)
}

/// Seed one product with a 30% margin.
pub async fn seed_product(state: &ServerState, name: &str, cost: f64, stock: i64) -> Product {
    ProductRepository::new(state.get_db())
        .create(ProductCreate {
            name: name.to_string(),
            description: None,
            cost,
            margin_percent: Some(30.0),
            stock,
            unit: None,
            image: None,
        })
        .await
        .expect("failed to seed product")
}

/// The product's stored id as a `product:key` string.
pub fn product_id(product: &Product) -> String {
    product
        .id
        .as_ref()
        .expect("seeded product has an id")
        .to_string()
}

/// Reload a product to observe its current stock.
pub async fn current_stock(state: &ServerState, id: &str) -> i64 {
    ProductRepository::new(state.get_db())
        .find_by_id(id)
        .await
        .expect("product lookup failed")
        .expect("product vanished")
        .stock
}
