//! Sale processing
//!
//! The transaction processor is the only write path for product stock.

pub mod money;
pub mod processor;

pub use processor::{SaleActor, SaleProcessor};
