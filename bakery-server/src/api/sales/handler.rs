//! Sales API Handlers

use axum::http::{HeaderName, StatusCode, header};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::SaleRequest;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Sale;
use crate::db::repository::sale::SaleFilter;
use crate::db::repository::{SaleRepository, parse_record_id};
use crate::reporting::render_receipt;
use crate::sales::{SaleActor, SaleProcessor};
use crate::utils::{AppError, AppResult, time};

fn processor(state: &ServerState) -> SaleProcessor {
    SaleProcessor::new(state.get_db(), state.config.price_source)
}

fn staff_actor(user: &CurrentUser) -> AppResult<SaleActor> {
    let id = parse_record_id("staff", &user.id)
        .map_err(|_| AppError::internal(format!("Malformed staff id in token: {}", user.id)))?;
    Ok(SaleActor::Staff {
        id,
        display_name: user.name.clone(),
    })
}

/// POST /api/sales — staff-initiated sale
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<SaleRequest>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let sale = processor(&state)
        .process(request, staff_actor(&user)?)
        .await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// POST /api/sales/customer — anonymous web-shop sale
pub async fn create_customer(
    State(state): State<ServerState>,
    Json(request): Json<SaleRequest>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let sale = processor(&state)
        .process(request, SaleActor::Anonymous)
        .await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// GET /api/sales/today — the calling staff member's sales today
pub async fn today(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Sale>>> {
    let staff = parse_record_id("staff", &user.id)
        .map_err(|_| AppError::internal(format!("Malformed staff id in token: {}", user.id)))?;
    let (start, end) = time::today_bounds_millis();

    let repo = SaleRepository::new(state.get_db());
    let sales = repo.find_for_staff_between(staff, start, end).await?;
    Ok(Json(sales))
}

/// Query parameters for the admin sales listing
#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    /// Inclusive start date, `YYYY-MM-DD`
    #[serde(default)]
    pub from: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`
    #[serde(default)]
    pub to: Option<String>,
    /// Case-insensitive substring match on seller name
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

fn build_filter(query: SalesQuery) -> AppResult<SaleFilter> {
    let from_millis = match &query.from {
        Some(date) => Some(time::range_start_millis(time::parse_date(date)?)),
        None => None,
    };
    let to_millis = match &query.to {
        Some(date) => Some(time::range_end_millis(time::parse_date(date)?)),
        None => None,
    };

    Ok(SaleFilter {
        from_millis,
        to_millis,
        seller: query.seller.filter(|s| !s.trim().is_empty()),
        payment_method: query.payment_method.filter(|s| !s.trim().is_empty()),
        sold_by: None,
    })
}

/// GET /api/sales — all sales with filters (admin)
pub async fn list_all(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<Vec<Sale>>> {
    if !user.is_admin() {
        return Err(AppError::forbidden("Admin role required"));
    }

    let repo = SaleRepository::new(state.get_db());
    let sales = repo.find_filtered(build_filter(query)?).await?;
    Ok(Json(sales))
}

/// Today's sale count, revenue and records
#[derive(Debug, Serialize, Deserialize)]
pub struct TodayStats {
    pub total_sales: i64,
    pub total_revenue: f64,
    pub sales: Vec<Sale>,
}

/// GET /api/sales/stats — today's summary
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<TodayStats>> {
    let (start, end) = time::today_bounds_millis();

    let mut result = state
        .db
        .query(
            r#"
            LET $today = (
                SELECT * FROM sale
                WHERE created_at >= $start AND created_at < $end
                ORDER BY created_at DESC
            );
            RETURN {
                total_sales: count($today),
                total_revenue: math::sum($today.total) OR 0,
                sales: $today
            };
        "#,
        )
        .bind(("start", start))
        .bind(("end", end))
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let stats: Option<TodayStats> = result
        .take(1)
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(stats.unwrap_or(TodayStats {
        total_sales: 0,
        total_revenue: 0.0,
        sales: Vec::new(),
    })))
}

/// GET /api/sales/{id}/receipt — receipt PDF for one sale
pub async fn receipt(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<([(HeaderName, String); 2], Vec<u8>)> {
    let repo = SaleRepository::new(state.get_db());
    let sale = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sale {} not found", id)))?;

    let key = sale
        .id
        .as_ref()
        .map(|rid| rid.key().to_string())
        .unwrap_or_else(|| "sale".to_string());
    let bytes = render_receipt(&sale)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"receipt_{key}.pdf\""),
            ),
        ],
        bytes,
    ))
}
