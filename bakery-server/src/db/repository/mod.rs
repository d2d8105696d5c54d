//! Repository Module
//!
//! CRUD operations over the SurrealDB tables.

pub mod customer;
pub mod product;
pub mod sale;
pub mod staff;

// Re-exports
pub use customer::CustomerRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;
pub use staff::StaffRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a client-supplied id into a record id of `table`.
///
/// Accepts either the full `table:key` form or the bare key; any other
/// table prefix is rejected. This is the single place where id spellings
/// are normalized.
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.trim().is_empty() {
        return Err(RepoError::Validation("id must not be empty".to_string()));
    }
    if id.contains(':') {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if rid.table() != table {
            return Err(RepoError::Validation(format!(
                "Expected a {} id, got: {}",
                table, id
            )));
        }
        Ok(rid)
    } else {
        Ok(RecordId::from_table_key(table, id))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_bare_and_prefixed_ids() {
        let a = parse_record_id("product", "abc").unwrap();
        assert_eq!(a.table(), "product");

        let b = parse_record_id("product", "product:abc").unwrap();
        assert_eq!(b.table(), "product");
        assert_eq!(a, b);
    }

    #[test]
    fn parse_rejects_wrong_table_and_empty() {
        assert!(parse_record_id("product", "staff:abc").is_err());
        assert!(parse_record_id("product", "").is_err());
    }
}
