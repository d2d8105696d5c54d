//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values are stored as `f64`; all arithmetic goes through
//! `Decimal` and is rounded back to two places for storage.

use rust_decimal::prelude::*;

use shared::SaleItemInput;

use crate::utils::AppError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per unit
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: i64 = 9999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round an f64 amount to cents
#[inline]
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Derive the sale price from production cost and margin percent:
/// `cost * (1 + margin / 100)`, rounded to cents.
pub fn derive_sale_price(cost: f64, margin_percent: f64) -> f64 {
    let price =
        to_decimal(cost) * (Decimal::ONE + to_decimal(margin_percent) / Decimal::ONE_HUNDRED);
    to_f64(price)
}

/// Bounds-check a requested sale line before it reaches the transaction.
///
/// Positivity is enforced inside the transaction (after the existence
/// check, matching the per-item validation order); this guards the upper
/// bound so a single line cannot blow up the generated statement.
pub fn validate_item_bounds(item: &SaleItemInput) -> Result<(), AppError> {
    if item.quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "Quantity for {} exceeds the maximum allowed ({})",
            item.display_name(),
            MAX_QUANTITY
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_derive_sale_price() {
        assert_eq!(derive_sale_price(10.0, 30.0), 13.0);
        assert_eq!(derive_sale_price(2.5, 0.0), 2.5);
        // 3.33 * 1.3 = 4.329 -> 4.33
        assert_eq!(derive_sale_price(3.33, 30.0), 4.33);
    }

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn test_validate_item_bounds() {
        let mut item = SaleItemInput {
            product_id: "product:m".to_string(),
            name: Some("Muffin".to_string()),
            quantity: 3,
        };
        assert!(validate_item_bounds(&item).is_ok());

        item.quantity = MAX_QUANTITY;
        assert!(validate_item_bounds(&item).is_ok());

        item.quantity = MAX_QUANTITY + 1;
        assert!(validate_item_bounds(&item).is_err());
    }
}
