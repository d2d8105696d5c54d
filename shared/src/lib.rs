//! Shared wire types for the bakery POS.
//!
//! Request/response DTOs exchanged between the server and its clients.
//! Kept free of server-side concerns so desktop or web clients can reuse
//! the same definitions.

pub mod client;
pub mod sale;

pub use client::{
    CaptchaChallenge, CustomerAuthResponse, CustomerLoginRequest, CustomerRegisterRequest,
    Gender, LoginRequest, LoginResponse, PasswordStrength, RegisterRequest, RegisterResponse,
    StaffRole, StrengthLevel, UserInfo,
};
pub use sale::{CustomerInfo, PaymentMethod, SaleItemInput, SaleRequest};
