//! Input validation helpers
//!
//! Centralized text length limits, email validation and the password
//! strength score used by staff and customer registration.

use shared::{PasswordStrength, StrengthLevel};
use validator::ValidateEmail;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, staff, customer, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone, tax id, unit labels
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Addresses and descriptions
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate an email address (format + length).
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation("email must not be empty"));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(AppError::validation("email is too long"));
    }
    if !email.validate_email() {
        return Err(AppError::validation(format!("Invalid email address: {email}")));
    }
    Ok(())
}

// ── Password strength ───────────────────────────────────────────────

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Score a password on five criteria: length >= 8, lowercase, uppercase,
/// digits, special characters. Score <= 2 is weak, <= 3 normal, else strong.
pub fn evaluate_password_strength(password: &str) -> PasswordStrength {
    let mut score: u8 = 0;
    let mut feedback = Vec::new();

    if password.len() >= 8 {
        score += 1;
    } else {
        feedback.push("Must be at least 8 characters long".to_string());
    }

    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    } else {
        feedback.push("Must contain lowercase letters".to_string());
    }

    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    } else {
        feedback.push("Must contain uppercase letters".to_string());
    }

    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    } else {
        feedback.push("Must contain digits".to_string());
    }

    if password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        score += 1;
    } else {
        feedback.push("Must contain special characters".to_string());
    }

    let level = if score <= 2 {
        StrengthLevel::Weak
    } else if score <= 3 {
        StrengthLevel::Normal
    } else {
        StrengthLevel::Strong
    };

    PasswordStrength {
        level,
        score,
        feedback,
    }
}

/// Reject weak or over-long passwords; returns the strength report for
/// inclusion in the response.
pub fn require_acceptable_password(password: &str) -> Result<PasswordStrength, AppError> {
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("password is too long"));
    }
    let strength = evaluate_password_strength(password);
    if strength.level == StrengthLevel::Weak {
        return Err(AppError::validation(format!(
            "Password is too weak: {}",
            strength.feedback.join(", ")
        )));
    }
    Ok(strength)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_is_weak() {
        let s = evaluate_password_strength("");
        assert_eq!(s.level, StrengthLevel::Weak);
        assert_eq!(s.score, 0);
        assert_eq!(s.feedback.len(), 5);
    }

    #[test]
    fn all_criteria_is_strong() {
        let s = evaluate_password_strength("Abcdef1!");
        assert_eq!(s.level, StrengthLevel::Strong);
        assert_eq!(s.score, 5);
        assert!(s.feedback.is_empty());
    }

    #[test]
    fn missing_one_criterion_is_normal() {
        // no special character, no uppercase -> score 3
        let s = evaluate_password_strength("abcdefg1");
        assert_eq!(s.score, 3);
        assert_eq!(s.level, StrengthLevel::Normal);
    }

    #[test]
    fn short_lowercase_is_weak() {
        let s = evaluate_password_strength("abc");
        assert_eq!(s.level, StrengthLevel::Weak);
    }

    #[test]
    fn weak_password_rejected() {
        assert!(require_acceptable_password("abc").is_err());
        assert!(require_acceptable_password("Abcdef1!").is_ok());
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("ana@bakery.test").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn required_text_limits() {
        assert!(validate_required_text("Muffin", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }
}
