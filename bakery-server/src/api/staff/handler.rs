//! Staff API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Staff, StaffCreate, StaffUpdate};
use crate::db::repository::StaffRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, require_acceptable_password, validate_email, validate_required_text,
};
use crate::utils::AppResult;

/// GET /api/staff — all staff members, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Staff>>> {
    let repo = StaffRepository::new(state.get_db());
    let staff = repo.find_all().await?;
    Ok(Json(staff))
}

/// POST /api/staff — create a staff member
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<Staff>> {
    validate_required_text(&payload.first_name, "first name", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "last name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    require_acceptable_password(&payload.password)?;

    let repo = StaffRepository::new(state.get_db());
    let staff = repo.create(payload).await?;

    tracing::info!(email = %staff.email, role = staff.role.as_str(), "Staff member created");

    Ok(Json(staff))
}

/// PUT /api/staff/{id} — update a staff member
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<Json<Staff>> {
    if let Some(ref email) = payload.email {
        validate_email(email)?;
    }
    if let Some(ref password) = payload.password {
        require_acceptable_password(password)?;
    }

    let repo = StaffRepository::new(state.get_db());
    let staff = repo.update(&id, payload).await?;
    Ok(Json(staff))
}

/// DELETE /api/staff/{id} — delete a staff member
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Staff>> {
    let repo = StaffRepository::new(state.get_db());
    let staff = repo.delete(&id).await?;

    tracing::info!(email = %staff.email, "Staff member deleted");

    Ok(Json(staff))
}

/// PUT /api/staff/{id}/pay — stamp the last salary payment
pub async fn pay(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Staff>> {
    let repo = StaffRepository::new(state.get_db());
    let staff = repo.mark_paid(&id).await?;

    tracing::info!(email = %staff.email, "Salary payment recorded");

    Ok(Json(staff))
}
