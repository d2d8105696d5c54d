//! Auth and account DTOs

use serde::{Deserialize, Serialize};

/// Staff roles. Admins can manage the catalog, staff and full sales history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StaffRole {
    Admin,
    #[default]
    Employee,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "Admin",
            StaffRole::Employee => "Employee",
        }
    }
}

/// Customer gender options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Staff login request. Captcha fields are optional; when a challenge id
/// is supplied it must verify before credentials are checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub captcha_id: Option<String>,
    #[serde(default)]
    pub captcha_value: Option<String>,
}

/// Authenticated staff profile returned by login and registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Captcha challenge: opaque id plus a self-contained SVG document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaChallenge {
    pub id: String,
    pub data: String,
}

/// Staff self-registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub age: i64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<StaffRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserInfo,
    pub password_strength: PasswordStrength,
}

/// Password strength classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Normal,
    Strong,
}

/// Result of scoring a password: one point each for length, lowercase,
/// uppercase, digits and special characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordStrength {
    pub level: StrengthLevel,
    pub score: u8,
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
    /// ISO date, `YYYY-MM-DD`
    pub birth_date: String,
    pub gender: Gender,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerLoginRequest {
    pub email: String,
    pub password: String,
}

/// Customer session returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAuthResponse {
    pub token: String,
    pub id: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_role_round_trip() {
        let json = serde_json::to_string(&StaffRole::Admin).unwrap();
        assert_eq!(json, "\"Admin\"");
        let role: StaffRole = serde_json::from_str("\"Employee\"").unwrap();
        assert_eq!(role, StaffRole::Employee);
    }

    #[test]
    fn login_request_without_captcha() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.com","password":"pw"}"#).unwrap();
        assert!(req.captcha_id.is_none());
    }
}
