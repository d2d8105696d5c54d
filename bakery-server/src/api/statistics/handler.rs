//! Statistics API Handlers
//!
//! Aggregations over committed sales. Line items are embedded arrays, so
//! per-product figures come from flattening them and grouping by name.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Sale;
use crate::db::repository::sale::SaleFilter;
use crate::db::repository::{SaleRepository, parse_record_id};
use crate::utils::{AppError, AppResult, time};

/// Per-product sales aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSalesStat {
    pub name: String,
    pub total_quantity: i64,
    pub revenue: f64,
}

/// GET /api/stats/sales-by-product — quantity and revenue per product (admin)
pub async fn sales_by_product(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ProductSalesStat>>> {
    let mut result = state
        .db
        .query(
            r#"
            LET $lines = array::flatten((SELECT VALUE items FROM sale));
            SELECT
                name,
                math::sum(quantity) AS total_quantity,
                math::sum(line_total) AS revenue
            FROM $lines
            GROUP BY name
            ORDER BY total_quantity DESC;
        "#,
        )
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let stats: Vec<ProductSalesStat> = result
        .take(1)
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(stats))
}

/// Query parameters for the sales history
#[derive(Debug, Deserialize)]
pub struct SalesHistoryQuery {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// GET /api/stats/sales-history — filtered history
///
/// Admins see everything; other staff only their own sales.
pub async fn sales_history(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SalesHistoryQuery>,
) -> AppResult<Json<Vec<Sale>>> {
    let from_millis = match &query.start_date {
        Some(date) => Some(time::range_start_millis(time::parse_date(date)?)),
        None => None,
    };
    let to_millis = match &query.end_date {
        Some(date) => Some(time::range_end_millis(time::parse_date(date)?)),
        None => None,
    };

    let sold_by = if user.is_admin() {
        None
    } else {
        Some(parse_record_id("staff", &user.id).map_err(|_| {
            AppError::internal(format!("Malformed staff id in token: {}", user.id))
        })?)
    };

    let repo = SaleRepository::new(state.get_db());
    let sales = repo
        .find_filtered(SaleFilter {
            from_millis,
            to_millis,
            seller: query.seller.filter(|s| !s.trim().is_empty()),
            payment_method: query.payment_method.filter(|s| !s.trim().is_empty()),
            sold_by,
        })
        .await?;

    Ok(Json(sales))
}
