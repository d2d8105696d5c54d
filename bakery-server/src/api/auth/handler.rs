//! Authentication Handlers
//!
//! Staff login, captcha challenges, staff self-registration and logout.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use shared::{
    CaptchaChallenge, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserInfo,
};

use crate::auth::{ActorKind, CurrentUser};
use crate::core::ServerState;
use crate::db::models::StaffCreate;
use crate::db::repository::StaffRepository;
use crate::services::CaptchaOutcome;
use crate::utils::validation::{
    MAX_NAME_LEN, require_acceptable_password, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to blunt timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login — authenticate a staff member
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    // Captcha, when a challenge id was issued to this client
    if let Some(captcha_id) = &req.captcha_id {
        let answer = req.captcha_value.as_deref().unwrap_or_default();
        match state.captcha.verify(captcha_id, answer) {
            CaptchaOutcome::Ok => {}
            CaptchaOutcome::Missing | CaptchaOutcome::Expired => {
                return Err(AppError::validation("Captcha expired"));
            }
            CaptchaOutcome::Mismatch => {
                return Err(AppError::validation("Captcha incorrect"));
            }
        }
    }

    let repo = StaffRepository::new(state.get_db());
    let staff = repo.find_by_email(req.email.trim()).await?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message prevents email enumeration
    let staff = match staff {
        Some(s) => {
            if !s.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            let password_valid = s
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            s
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    let staff_id = staff
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    let display_name = staff.display_name();

    let token = state
        .get_jwt_service()
        .generate_token(
            &staff_id,
            &display_name,
            &staff.email,
            staff.role.as_str(),
            ActorKind::Staff,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        staff_id = %staff_id,
        email = %staff.email,
        role = staff.role.as_str(),
        "Staff member logged in"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: staff_id,
            name: display_name,
            email: staff.email,
            role: staff.role,
        },
    }))
}

/// GET /api/auth/captcha — issue a new captcha challenge
pub async fn captcha(State(state): State<ServerState>) -> Json<CaptchaChallenge> {
    Json(state.captcha.issue())
}

/// POST /api/auth/register — staff self-registration
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    validate_required_text(&req.first_name, "first name", MAX_NAME_LEN)?;
    validate_required_text(&req.last_name, "last name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    let password_strength = require_acceptable_password(&req.password)?;

    let repo = StaffRepository::new(state.get_db());
    let staff = repo
        .create(StaffCreate {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            age: Some(req.age),
            role: req.role,
            schedule: None,
            contact: req.phone,
            address: req.address,
            salary: None,
        })
        .await?;

    let staff_id = staff
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();

    tracing::info!(staff_id = %staff_id, email = %staff.email, "Staff member registered");

    Ok(Json(RegisterResponse {
        user: UserInfo {
            id: staff_id,
            name: staff.display_name(),
            email: staff.email.clone(),
            role: staff.role,
        },
        password_strength,
    }))
}

/// POST /api/auth/logout
pub async fn logout(Extension(user): Extension<CurrentUser>) -> Json<serde_json::Value> {
    tracing::info!(user_id = %user.id, email = %user.email, "User logged out");
    Json(serde_json::json!({ "message": "Logout OK" }))
}
