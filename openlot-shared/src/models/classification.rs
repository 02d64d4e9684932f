//! Classification model and database operations
//!
//! Classifications are the reference data behind the navigation bar and the
//! vehicle-form dropdown. They are re-read from the table on every request
//! rather than cached, so a freshly added classification shows up in the
//! nav immediately.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A named category grouping inventory items (e.g., "Sedan")
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Classification {
    /// Unique classification ID
    pub classification_id: i32,

    /// Display name, alphanumeric only
    pub classification_name: String,
}

impl Classification {
    /// Lists all classifications ordered by name
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Classification>(
            r#"
            SELECT classification_id, classification_name
            FROM classification
            ORDER BY classification_name
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Finds a classification by ID
    pub async fn find_by_id(
        pool: &PgPool,
        classification_id: i32,
    ) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, Classification>(
            r#"
            SELECT classification_id, classification_name
            FROM classification
            WHERE classification_id = $1
            "#,
        )
        .bind(classification_id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Creates a new classification
    ///
    /// # Errors
    ///
    /// Returns an error if the name already exists or the database is
    /// unreachable.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, Classification>(
            r#"
            INSERT INTO classification (classification_name)
            VALUES ($1)
            RETURNING classification_id, classification_name
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }
}
