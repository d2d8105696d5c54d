//! Sale Model
//!
//! Sales are immutable once created: there is no update or delete path.
//! Line items are price snapshots taken inside the sale transaction.

use serde::{Deserialize, Serialize};
use shared::{CustomerInfo, PaymentMethod};
use surrealdb::RecordId;

use super::serde_helpers;

/// Sale ID type
pub type SaleId = RecordId;

/// Seller name recorded on anonymous web-shop sales
pub const ANONYMOUS_SELLER: &str = "Online customer";

/// One line of a committed sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    /// Product name at the time of sale
    pub name: String,
    pub quantity: i64,
    /// Unit price snapshot (cost or sale price, per the configured policy)
    pub unit_price: f64,
    /// quantity x unit_price, rounded to cents
    pub line_total: f64,
}

/// Committed sale record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<SaleId>,
    pub items: Vec<SaleItem>,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub customer: CustomerInfo,
    /// Staff record link; None for anonymous sales
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub sold_by: Option<RecordId>,
    /// Denormalized seller display name
    pub sold_by_name: String,
    /// Server-assigned creation time (Unix millis)
    pub created_at: i64,
}
