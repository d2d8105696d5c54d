//! Database Models

// Serde helpers
pub mod serde_helpers;

// Catalog
pub mod product;

// Sales
pub mod sale;

// Accounts
pub mod customer;
pub mod staff;

// Re-exports
pub use customer::{Customer, CustomerCreate, CustomerProfileUpdate};
pub use product::{Product, ProductCreate, ProductId, ProductUpdate};
pub use sale::{Sale, SaleId, SaleItem};
pub use staff::{Staff, StaffCreate, StaffId, StaffUpdate};
