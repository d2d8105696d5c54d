//! Staff Model
//!
//! One table serves both login and staff management.

use serde::{Deserialize, Serialize};
use shared::StaffRole;
use surrealdb::RecordId;

use super::serde_helpers;

/// Staff ID type
pub type StaffId = RecordId;

/// Staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<StaffId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(default)]
    pub age: Option<i64>,
    pub role: StaffRole,
    #[serde(default = "default_schedule")]
    pub schedule: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub salary: f64,
    /// Last salary payment (Unix millis)
    #[serde(default)]
    pub last_paid_at: Option<i64>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_schedule() -> String {
    "9:00-18:00".to_string()
}

fn default_true() -> bool {
    true
}

impl Staff {
    /// Full display name
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Verify a password against the stored argon2 hash
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        verify_password(&self.hash_pass, password)
    }

    /// Hash a password with argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        hash_password(password)
    }
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub role: Option<StaffRole>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
}

/// Update staff payload (partial; password is re-hashed when present)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub role: Option<StaffRole>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Hash a password with argon2 and a fresh salt
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify a password against an argon2 hash
pub fn verify_password(hash: &str, password: &str) -> Result<bool, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier},
    };

    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
