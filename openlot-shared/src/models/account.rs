//! Account model and database operations
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE account (
//!     account_id SERIAL PRIMARY KEY,
//!     account_firstname VARCHAR(50) NOT NULL,
//!     account_lastname VARCHAR(50) NOT NULL,
//!     account_email VARCHAR(100) NOT NULL UNIQUE,
//!     account_password VARCHAR(255) NOT NULL,
//!     account_type account_type NOT NULL DEFAULT 'Client'
//! );
//! ```
//!
//! Passwords are stored as Argon2id hashes, never in plaintext, and the
//! hash is never serialized out of the server. Accounts are never
//! hard-deleted by this application.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Account role
///
/// `Employee` and `Admin` are the privileged roles that may administer
/// inventory; everyone registers as `Client`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_type")]
pub enum AccountType {
    /// Regular customer account
    Client,

    /// Dealership staff
    Employee,

    /// Site administrator
    Admin,
}

impl AccountType {
    /// Converts the role to its database/display string
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Client => "Client",
            AccountType::Employee => "Employee",
            AccountType::Admin => "Admin",
        }
    }

    /// Whether this role may administer inventory
    pub fn is_privileged(&self) -> bool {
        matches!(self, AccountType::Employee | AccountType::Admin)
    }
}

/// Account model representing a customer or staff account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID
    pub account_id: i32,

    /// First name
    pub account_firstname: String,

    /// Last name
    pub account_lastname: String,

    /// Email address, unique across all accounts
    pub account_email: String,

    /// Argon2id password hash
    ///
    /// Never leaves the server process.
    #[serde(skip_serializing)]
    pub account_password: String,

    /// Account role
    pub account_type: AccountType,
}

impl Account {
    /// Creates a new account
    ///
    /// `password_hash` must already be an Argon2id PHC string; hashing is
    /// the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint) or
    /// the database is unreachable.
    pub async fn create(
        pool: &PgPool,
        firstname: &str,
        lastname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Self, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO account (account_firstname, account_lastname, account_email, account_password)
            VALUES ($1, $2, $3, $4)
            RETURNING account_id, account_firstname, account_lastname, account_email,
                      account_password, account_type
            "#,
        )
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT account_id, account_firstname, account_lastname, account_email,
                   account_password, account_type
            FROM account
            WHERE account_email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by ID
    pub async fn find_by_id(pool: &PgPool, account_id: i32) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT account_id, account_firstname, account_lastname, account_email,
                   account_password, account_type
            FROM account
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Updates the three self-service profile fields by id
    ///
    /// Returns the fresh row, from which the caller reissues the identity
    /// token.
    pub async fn update_profile(
        pool: &PgPool,
        account_id: i32,
        firstname: &str,
        lastname: &str,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE account
            SET account_firstname = $2, account_lastname = $3, account_email = $4
            WHERE account_id = $1
            RETURNING account_id, account_firstname, account_lastname, account_email,
                      account_password, account_type
            "#,
        )
        .bind(account_id)
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Replaces the stored password hash by id
    ///
    /// Returns true if an account row was updated.
    pub async fn update_password(
        pool: &PgPool,
        account_id: i32,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE account SET account_password = $2 WHERE account_id = $1")
            .bind(account_id)
            .bind(password_hash)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether an email is already registered
    ///
    /// `exclude_account_id` lets the account-update form accept its own
    /// current email while still rejecting anyone else's.
    pub async fn email_exists(
        pool: &PgPool,
        email: &str,
        exclude_account_id: Option<i32>,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM account
            WHERE account_email = $1
              AND ($2::int IS NULL OR account_id <> $2)
            "#,
        )
        .bind(email)
        .bind(exclude_account_id)
        .fetch_one(pool)
        .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_as_str() {
        assert_eq!(AccountType::Client.as_str(), "Client");
        assert_eq!(AccountType::Employee.as_str(), "Employee");
        assert_eq!(AccountType::Admin.as_str(), "Admin");
    }

    #[test]
    fn test_account_type_privilege() {
        assert!(!AccountType::Client.is_privileged());
        assert!(AccountType::Employee.is_privileged());
        assert!(AccountType::Admin.is_privileged());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let account = Account {
            account_id: 1,
            account_firstname: "A".to_string(),
            account_lastname: "B".to_string(),
            account_email: "a@b.test".to_string(),
            account_password: "$argon2id$secret".to_string(),
            account_type: AccountType::Client,
        };

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("account_password"));
    }

    // Integration tests for database operations require a running database.
}
