//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - staff authentication and captcha
//! - [`products`] - catalog management
//! - [`sales`] - sale creation and history
//! - [`staff`] - staff management
//! - [`customers`] - customer accounts
//! - [`statistics`] - sales aggregates
//! - [`reports`] - PDF reports

pub mod auth;
pub mod customers;
pub mod health;
pub mod products;
pub mod reports;
pub mod sales;
pub mod staff;
pub mod statistics;
