//! Sale request/response types

use serde::{Deserialize, Serialize};

/// Accepted payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Transfer => "Transfer",
        }
    }
}

/// Customer snapshot embedded in every sale.
///
/// Only `name` is required; the rest is whatever the cashier or the web
/// checkout form collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// One requested line in a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemInput {
    /// Product record reference (`product:xyz` or the bare key)
    pub product_id: String,
    /// Display name, used in not-found messages when the lookup fails
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: i64,
}

impl SaleItemInput {
    /// Name to show in error messages for this line
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.product_id)
    }
}

/// Sale creation request body (staff and anonymous endpoints share it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    pub items: Vec<SaleItemInput>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    pub customer: CustomerInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_defaults_to_cash() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }

    #[test]
    fn sale_request_accepts_minimal_body() {
        let json = r#"{
            "items": [{"product_id": "product:abc", "quantity": 2}],
            "customer": {"name": "Ana"}
        }"#;
        let req: SaleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.items.len(), 1);
        assert!(req.payment_method.is_none());
        assert_eq!(req.items[0].display_name(), "product:abc");
        assert!(req.customer.tax_id.is_none());
    }
}
