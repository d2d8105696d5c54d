//! Staff Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Staff, StaffCreate, StaffUpdate};

const STAFF_TABLE: &str = "staff";

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all staff members, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT * FROM staff ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(staff)
    }

    /// Find staff member by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Staff>> {
        let rid = parse_record_id(STAFF_TABLE, id)?;
        let staff: Option<Staff> = self.base.db().select(rid).await?;
        Ok(staff)
    }

    /// Find staff member by email (login lookup)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Staff>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM staff WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let staff: Vec<Staff> = result.take(0)?;
        Ok(staff.into_iter().next())
    }

    /// Create a new staff member
    ///
    /// The password hash is written through an explicit SET clause; the
    /// model never serializes it.
    pub async fn create(&self, data: StaffCreate) -> RepoResult<Staff> {
        // Check duplicate email
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "A staff member with email '{}' already exists",
                data.email
            )));
        }

        let hash_pass = Staff::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE staff SET
                    first_name = $first_name,
                    last_name = $last_name,
                    email = $email,
                    hash_pass = $hash_pass,
                    age = $age,
                    role = $role,
                    schedule = $schedule,
                    contact = $contact,
                    address = $address,
                    salary = $salary,
                    last_paid_at = NONE,
                    is_active = true,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("first_name", data.first_name))
            .bind(("last_name", data.last_name))
            .bind(("email", data.email))
            .bind(("hash_pass", hash_pass))
            .bind(("age", data.age))
            .bind(("role", data.role.unwrap_or_default()))
            .bind((
                "schedule",
                data.schedule.unwrap_or_else(|| "9:00-18:00".to_string()),
            ))
            .bind(("contact", data.contact))
            .bind(("address", data.address))
            .bind(("salary", data.salary.unwrap_or(2500.0)))
            .bind(("created_at", Utc::now().timestamp_millis()))
            .await?;

        let created: Option<Staff> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff member".to_string()))
    }

    /// Update a staff member. A new password is re-hashed before storage.
    pub async fn update(&self, id: &str, data: StaffUpdate) -> RepoResult<Staff> {
        let rid = parse_record_id(STAFF_TABLE, id)?;
        let mut staff = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Staff member {} not found", id)))?;

        // Check duplicate email if changing
        if let Some(ref new_email) = data.email
            && new_email != &staff.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "A staff member with email '{}' already exists",
                new_email
            )));
        }

        if let Some(password) = data.password {
            staff.hash_pass = Staff::hash_password(&password)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;
        }
        if let Some(v) = data.first_name {
            staff.first_name = v;
        }
        if let Some(v) = data.last_name {
            staff.last_name = v;
        }
        if let Some(v) = data.email {
            staff.email = v;
        }
        if let Some(v) = data.age {
            staff.age = Some(v);
        }
        if let Some(v) = data.role {
            staff.role = v;
        }
        if let Some(v) = data.schedule {
            staff.schedule = v;
        }
        if let Some(v) = data.contact {
            staff.contact = Some(v);
        }
        if let Some(v) = data.address {
            staff.address = Some(v);
        }
        if let Some(v) = data.salary {
            staff.salary = v;
        }
        if let Some(v) = data.is_active {
            staff.is_active = v;
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    first_name = $first_name,
                    last_name = $last_name,
                    email = $email,
                    hash_pass = $hash_pass,
                    age = $age,
                    role = $role,
                    schedule = $schedule,
                    contact = $contact,
                    address = $address,
                    salary = $salary,
                    is_active = $is_active
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("first_name", staff.first_name))
            .bind(("last_name", staff.last_name))
            .bind(("email", staff.email))
            .bind(("hash_pass", staff.hash_pass))
            .bind(("age", staff.age))
            .bind(("role", staff.role))
            .bind(("schedule", staff.schedule))
            .bind(("contact", staff.contact))
            .bind(("address", staff.address))
            .bind(("salary", staff.salary))
            .bind(("is_active", staff.is_active))
            .await?;

        result
            .take::<Option<Staff>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Staff member {} not found", id)))
    }

    /// Hard delete a staff member
    pub async fn delete(&self, id: &str) -> RepoResult<Staff> {
        let rid = parse_record_id(STAFF_TABLE, id)?;
        let deleted: Option<Staff> = self.base.db().delete(rid).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Staff member {} not found", id)))
    }

    /// Stamp the last salary payment time
    pub async fn mark_paid(&self, id: &str) -> RepoResult<Staff> {
        let rid = parse_record_id(STAFF_TABLE, id)?;
        let now = Utc::now().timestamp_millis();
        let mut result = self
            .base
            .db()
            .query("UPDATE $staff SET last_paid_at = $now RETURN AFTER")
            .bind(("staff", rid))
            .bind(("now", now))
            .await?;
        let updated: Vec<Staff> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Staff member {} not found", id)))
    }
}
