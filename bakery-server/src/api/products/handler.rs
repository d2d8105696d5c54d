//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::sales::money;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

fn validate_money_field(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    if value > money::MAX_PRICE {
        return Err(AppError::validation(format!(
            "{field} exceeds the maximum allowed"
        )));
    }
    Ok(())
}

/// GET /api/products — full catalog, in-stock first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo.find_all().await?;
    Ok(Json(products))
}

/// POST /api/products — create a product (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_money_field(payload.cost, "cost")?;
    if let Some(margin) = payload.margin_percent
        && (!margin.is_finite() || margin < 0.0)
    {
        return Err(AppError::validation("margin must be a non-negative number"));
    }
    if let Some(ref unit) = payload.unit {
        validate_required_text(unit, "unit", MAX_SHORT_TEXT_LEN)?;
    }

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(payload).await?;

    tracing::info!(
        product = %product.name,
        stock = product.stock,
        "Product created"
    );

    Ok(Json(product))
}

/// PUT /api/products/{id} — update a product (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(cost) = payload.cost {
        validate_money_field(cost, "cost")?;
    }
    if let Some(margin) = payload.margin_percent
        && (!margin.is_finite() || margin < 0.0)
    {
        return Err(AppError::validation("margin must be a non-negative number"));
    }

    let repo = ProductRepository::new(state.get_db());
    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id} — delete a product (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo.delete(&id).await?;

    tracing::info!(product = %product.name, "Product deleted");

    Ok(Json(product))
}
