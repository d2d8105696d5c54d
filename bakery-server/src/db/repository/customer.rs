//! Customer Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::staff::hash_password;
use crate::db::models::{Customer, CustomerCreate, CustomerProfileUpdate};

const CUSTOMER_TABLE: &str = "customer";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find customer by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let rid = parse_record_id(CUSTOMER_TABLE, id)?;
        let customer: Option<Customer> = self.base.db().select(rid).await?;
        Ok(customer)
    }

    /// Find customer by email (login lookup)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    /// Create a new customer account
    ///
    /// The password hash is written through an explicit SET clause; the
    /// model never serializes it.
    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "An account with email '{}' already exists",
                data.email
            )));
        }

        let hash_pass = hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE customer SET
                    first_name = $first_name,
                    last_name = $last_name,
                    email = $email,
                    phone = $phone,
                    address = $address,
                    hash_pass = $hash_pass,
                    birth_date = $birth_date,
                    gender = $gender,
                    is_active = true,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("first_name", data.first_name))
            .bind(("last_name", data.last_name))
            .bind(("email", data.email))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("hash_pass", hash_pass))
            .bind(("birth_date", data.birth_date))
            .bind(("gender", data.gender))
            .bind(("created_at", Utc::now().timestamp_millis()))
            .await?;

        let created: Option<Customer> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    /// Update a customer's own profile. Passwords are never touched here.
    pub async fn update_profile(
        &self,
        id: &str,
        data: CustomerProfileUpdate,
    ) -> RepoResult<Customer> {
        let rid = parse_record_id(CUSTOMER_TABLE, id)?;
        let mut customer = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))?;

        if let Some(v) = data.first_name {
            customer.first_name = v;
        }
        if let Some(v) = data.last_name {
            customer.last_name = v;
        }
        if let Some(v) = data.phone {
            customer.phone = v;
        }
        if let Some(v) = data.address {
            customer.address = v;
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    first_name = $first_name,
                    last_name = $last_name,
                    phone = $phone,
                    address = $address
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("first_name", customer.first_name))
            .bind(("last_name", customer.last_name))
            .bind(("phone", customer.phone))
            .bind(("address", customer.address))
            .await?;

        result
            .take::<Option<Customer>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }
}
