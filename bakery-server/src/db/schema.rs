//! Schema definitions
//!
//! Applied at startup; every statement is idempotent (`IF NOT EXISTS`).
//! The `stock >= 0` assertion is the storage-level backstop for the
//! no-negative-stock invariant; the sale transaction checks it explicitly
//! before decrementing.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::utils::AppError;

const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS product SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS name ON product TYPE string;
    DEFINE FIELD IF NOT EXISTS description ON product TYPE string DEFAULT '';
    DEFINE FIELD IF NOT EXISTS cost ON product TYPE number;
    DEFINE FIELD IF NOT EXISTS sale_price ON product TYPE number;
    DEFINE FIELD IF NOT EXISTS margin_percent ON product TYPE number DEFAULT 30;
    DEFINE FIELD IF NOT EXISTS stock ON product TYPE int ASSERT $value >= 0;
    DEFINE FIELD IF NOT EXISTS unit ON product TYPE string DEFAULT 'unit';
    DEFINE FIELD IF NOT EXISTS image ON product TYPE option<string>;

    DEFINE TABLE IF NOT EXISTS sale SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS items ON sale FLEXIBLE TYPE array;
    DEFINE FIELD IF NOT EXISTS total ON sale TYPE number;
    DEFINE FIELD IF NOT EXISTS payment_method ON sale TYPE string
        ASSERT $value INSIDE ['Cash', 'Card', 'Transfer'];
    DEFINE FIELD IF NOT EXISTS customer ON sale FLEXIBLE TYPE object;
    DEFINE FIELD IF NOT EXISTS sold_by ON sale TYPE option<record<staff>>;
    DEFINE FIELD IF NOT EXISTS sold_by_name ON sale TYPE string;
    DEFINE FIELD IF NOT EXISTS created_at ON sale TYPE int;

    DEFINE TABLE IF NOT EXISTS staff SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS first_name ON staff TYPE string;
    DEFINE FIELD IF NOT EXISTS last_name ON staff TYPE string;
    DEFINE FIELD IF NOT EXISTS email ON staff TYPE string;
    DEFINE FIELD IF NOT EXISTS hash_pass ON staff TYPE string;
    DEFINE FIELD IF NOT EXISTS age ON staff TYPE option<int>;
    DEFINE FIELD IF NOT EXISTS role ON staff TYPE string
        ASSERT $value INSIDE ['Admin', 'Employee'];
    DEFINE FIELD IF NOT EXISTS schedule ON staff TYPE string DEFAULT '9:00-18:00';
    DEFINE FIELD IF NOT EXISTS contact ON staff TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS address ON staff TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS salary ON staff TYPE number DEFAULT 2500;
    DEFINE FIELD IF NOT EXISTS last_paid_at ON staff TYPE option<int>;
    DEFINE FIELD IF NOT EXISTS is_active ON staff TYPE bool DEFAULT true;
    DEFINE FIELD IF NOT EXISTS created_at ON staff TYPE int;
    DEFINE INDEX IF NOT EXISTS staff_email ON staff FIELDS email UNIQUE;

    DEFINE TABLE IF NOT EXISTS customer SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS first_name ON customer TYPE string;
    DEFINE FIELD IF NOT EXISTS last_name ON customer TYPE string;
    DEFINE FIELD IF NOT EXISTS email ON customer TYPE string;
    DEFINE FIELD IF NOT EXISTS phone ON customer TYPE string;
    DEFINE FIELD IF NOT EXISTS address ON customer TYPE string;
    DEFINE FIELD IF NOT EXISTS hash_pass ON customer TYPE string;
    DEFINE FIELD IF NOT EXISTS birth_date ON customer TYPE string;
    DEFINE FIELD IF NOT EXISTS gender ON customer TYPE string
        ASSERT $value INSIDE ['Male', 'Female', 'Other'];
    DEFINE FIELD IF NOT EXISTS is_active ON customer TYPE bool DEFAULT true;
    DEFINE FIELD IF NOT EXISTS created_at ON customer TYPE int;
    DEFINE INDEX IF NOT EXISTS customer_email ON customer FIELDS email UNIQUE;
"#;

/// Apply all schema definitions.
pub async fn apply(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema statement failed: {e}")))?;
    Ok(())
}
