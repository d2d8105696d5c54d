//! Customer account handlers

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use shared::{CustomerAuthResponse, CustomerLoginRequest, CustomerRegisterRequest};

use crate::auth::{ActorKind, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{Customer, CustomerCreate, CustomerProfileUpdate};
use crate::db::repository::CustomerRepository;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, require_acceptable_password,
    validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult, time};

/// Fixed delay for authentication to blunt timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn auth_response(state: &ServerState, customer: &Customer) -> AppResult<CustomerAuthResponse> {
    let customer_id = customer
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    let display_name = customer.display_name();

    let token = state
        .get_jwt_service()
        .generate_token(
            &customer_id,
            &display_name,
            &customer.email,
            "Customer",
            ActorKind::Customer,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    Ok(CustomerAuthResponse {
        token,
        id: customer_id,
        name: display_name,
        email: customer.email.clone(),
    })
}

/// POST /api/customers/register
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<CustomerRegisterRequest>,
) -> AppResult<Json<CustomerAuthResponse>> {
    validate_required_text(&req.first_name, "first name", MAX_NAME_LEN)?;
    validate_required_text(&req.last_name, "last name", MAX_NAME_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.address, "address", MAX_ADDRESS_LEN)?;
    validate_email(&req.email)?;
    require_acceptable_password(&req.password)?;
    let birth_date = time::parse_date(&req.birth_date)?;
    if birth_date > chrono::Utc::now().date_naive() {
        return Err(AppError::validation("birth date cannot be in the future"));
    }

    let repo = CustomerRepository::new(state.get_db());
    let customer = repo
        .create(CustomerCreate {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            password: req.password,
            birth_date: req.birth_date,
            gender: req.gender,
        })
        .await?;

    tracing::info!(email = %customer.email, "Customer registered");

    Ok(Json(auth_response(&state, &customer)?))
}

/// POST /api/customers/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<CustomerLoginRequest>,
) -> AppResult<Json<CustomerAuthResponse>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let repo = CustomerRepository::new(state.get_db());
    let customer = repo.find_by_email(req.email.trim()).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let customer = match customer {
        Some(c) => {
            if !c.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }
            let password_valid = c
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
            if !password_valid {
                tracing::warn!(email = %req.email, "Customer login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            c
        }
        None => {
            tracing::warn!(email = %req.email, "Customer login failed - unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    Ok(Json(auth_response(&state, &customer)?))
}

/// GET /api/customers/profile
pub async fn profile(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Customer>> {
    let repo = CustomerRepository::new(state.get_db());
    let customer = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found".to_string()))?;
    Ok(Json(customer))
}

/// PUT /api/customers/profile — password changes are rejected here
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CustomerProfileUpdate>,
) -> AppResult<Json<Customer>> {
    if let Some(ref first_name) = payload.first_name {
        validate_required_text(first_name, "first name", MAX_NAME_LEN)?;
    }
    if let Some(ref last_name) = payload.last_name {
        validate_required_text(last_name, "last name", MAX_NAME_LEN)?;
    }
    if let Some(ref phone) = payload.phone {
        validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    }

    let repo = CustomerRepository::new(state.get_db());
    let customer = repo.update_profile(&user.id, payload).await?;
    Ok(Json(customer))
}
