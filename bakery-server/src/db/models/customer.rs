//! Customer Model

use serde::{Deserialize, Serialize};
use shared::Gender;
use surrealdb::RecordId;

use super::serde_helpers;
use super::staff;

/// Registered web-shop customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    /// ISO date, `YYYY-MM-DD`
    pub birth_date: String,
    pub gender: Gender,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

impl Customer {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        staff::verify_password(&self.hash_pass, password)
    }
}

/// Create customer payload (built from the registration request after
/// validation and password hashing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
    pub birth_date: String,
    pub gender: Gender,
}

/// Profile update payload. Password changes are not accepted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfileUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}
