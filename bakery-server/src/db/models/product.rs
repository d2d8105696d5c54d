//! Product Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Product ID type
pub type ProductId = RecordId;

/// Catalog entry. `sale_price` is always derived server-side from
/// `cost * (1 + margin_percent / 100)`; `stock` is only decremented by the
/// sale transaction processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Production cost
    pub cost: f64,
    /// Marked-up sale price (cost x (1 + margin))
    pub sale_price: f64,
    /// Profit margin in percent
    pub margin_percent: f64,
    /// Units available for sale
    pub stock: i64,
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Image reference (upload path or URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

fn default_unit() -> String {
    "unit".to_string()
}

/// Create product payload. The sale price is not accepted from clients;
/// it is derived on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cost: f64,
    #[serde(default)]
    pub margin_percent: Option<f64>,
    pub stock: i64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Update product payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub margin_percent: Option<f64>,
    /// Explicit restock value; never derived from sales
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}
