//! Auxiliary services.

pub mod captcha;

pub use captcha::{CaptchaOutcome, CaptchaStore};
