//! Review model and database operations
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE review (
//!     review_id SERIAL PRIMARY KEY,
//!     inv_id INTEGER NOT NULL REFERENCES inventory (inv_id),
//!     account_id INTEGER NOT NULL REFERENCES account (account_id),
//!     review_text TEXT NOT NULL,
//!     review_rating INTEGER NOT NULL CHECK (review_rating BETWEEN 1 AND 5),
//!     review_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     CONSTRAINT review_one_per_account_vehicle UNIQUE (inv_id, account_id)
//! );
//! ```
//!
//! The unique constraint is the authority on "one review per account per
//! vehicle". [`Review::create`] translates a constraint violation into
//! [`ReviewError::AlreadyReviewed`] so that two concurrent first-time
//! submissions resolve the same way as a pre-checked duplicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Name of the uniqueness constraint on (inv_id, account_id)
const ONE_PER_VEHICLE_CONSTRAINT: &str = "review_one_per_account_vehicle";

/// Error type for review mutations
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// The account has already reviewed this vehicle
    #[error("account has already reviewed this vehicle")]
    AlreadyReviewed,

    /// Any other database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A customer review of a vehicle
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    /// Unique review ID
    pub review_id: i32,

    /// Reviewed vehicle
    pub inv_id: i32,

    /// Authoring account
    pub account_id: i32,

    /// Free-text body, 10-1000 characters
    pub review_text: String,

    /// Star rating, 1-5
    pub review_rating: i32,

    /// When the review was created
    pub review_date: DateTime<Utc>,
}

/// A review joined with its author's name, for the vehicle detail page
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewWithAuthor {
    pub review_id: i32,
    pub inv_id: i32,
    pub account_id: i32,
    pub review_text: String,
    pub review_rating: i32,
    pub review_date: DateTime<Utc>,
    pub account_firstname: String,
    pub account_lastname: String,
}

/// A review joined with identifying vehicle fields, for the "my reviews"
/// list and the edit/delete views
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewWithVehicle {
    pub review_id: i32,
    pub inv_id: i32,
    pub account_id: i32,
    pub review_text: String,
    pub review_rating: i32,
    pub review_date: DateTime<Utc>,
    pub inv_make: String,
    pub inv_model: String,
    pub inv_year: String,
}

/// Aggregate rating for one vehicle, computed on read
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct RatingSummary {
    /// Mean rating; None when there are no reviews
    pub average_rating: Option<f64>,

    /// Number of reviews
    pub review_count: i64,
}

impl Review {
    /// Creates a new review
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::AlreadyReviewed`] if this account already has
    /// a review for the vehicle (unique constraint), or
    /// [`ReviewError::Database`] for any other failure.
    pub async fn create(
        pool: &PgPool,
        inv_id: i32,
        account_id: i32,
        review_text: &str,
        review_rating: i32,
    ) -> Result<Self, ReviewError> {
        let result = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO review (inv_id, account_id, review_text, review_rating)
            VALUES ($1, $2, $3, $4)
            RETURNING review_id, inv_id, account_id, review_text, review_rating, review_date
            "#,
        )
        .bind(inv_id)
        .bind(account_id)
        .bind(review_text)
        .bind(review_rating)
        .fetch_one(pool)
        .await;

        match result {
            Ok(review) => Ok(review),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some(ONE_PER_VEHICLE_CONSTRAINT) =>
            {
                Err(ReviewError::AlreadyReviewed)
            }
            Err(e) => Err(ReviewError::Database(e)),
        }
    }

    /// Lists all reviews for a vehicle with author names, newest first
    pub async fn list_by_inventory(
        pool: &PgPool,
        inv_id: i32,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ReviewWithAuthor>(
            r#"
            SELECT r.review_id, r.inv_id, r.account_id, r.review_text, r.review_rating,
                   r.review_date, a.account_firstname, a.account_lastname
            FROM review r
            JOIN account a ON r.account_id = a.account_id
            WHERE r.inv_id = $1
            ORDER BY r.review_date DESC
            "#,
        )
        .bind(inv_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Lists all reviews written by an account, newest first
    pub async fn list_by_account(
        pool: &PgPool,
        account_id: i32,
    ) -> Result<Vec<ReviewWithVehicle>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ReviewWithVehicle>(
            r#"
            SELECT r.review_id, r.inv_id, r.account_id, r.review_text, r.review_rating,
                   r.review_date, i.inv_make, i.inv_model, i.inv_year
            FROM review r
            JOIN inventory i ON r.inv_id = i.inv_id
            WHERE r.account_id = $1
            ORDER BY r.review_date DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Finds a review by ID, joined with its vehicle's identifying fields
    pub async fn find_by_id(
        pool: &PgPool,
        review_id: i32,
    ) -> Result<Option<ReviewWithVehicle>, sqlx::Error> {
        let row = sqlx::query_as::<_, ReviewWithVehicle>(
            r#"
            SELECT r.review_id, r.inv_id, r.account_id, r.review_text, r.review_rating,
                   r.review_date, i.inv_make, i.inv_model, i.inv_year
            FROM review r
            JOIN inventory i ON r.inv_id = i.inv_id
            WHERE r.review_id = $1
            "#,
        )
        .bind(review_id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Updates a review's text and rating by ID
    ///
    /// Ownership is checked by the caller before this runs.
    pub async fn update(
        pool: &PgPool,
        review_id: i32,
        review_text: &str,
        review_rating: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE review
            SET review_text = $2, review_rating = $3
            WHERE review_id = $1
            "#,
        )
        .bind(review_id)
        .bind(review_text)
        .bind(review_rating)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a review by ID
    ///
    /// Ownership is checked by the caller before this runs.
    pub async fn delete(pool: &PgPool, review_id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM review WHERE review_id = $1")
            .bind(review_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether an account has already reviewed a vehicle
    ///
    /// Only used for the friendly pre-check message; the unique constraint
    /// remains the authority under concurrency.
    pub async fn has_reviewed(
        pool: &PgPool,
        inv_id: i32,
        account_id: i32,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM review WHERE inv_id = $1 AND account_id = $2",
        )
        .bind(inv_id)
        .bind(account_id)
        .fetch_one(pool)
        .await?;

        Ok(count > 0)
    }

    /// Computes the aggregate rating for a vehicle
    ///
    /// AVG over an integer column comes back as NUMERIC, so it is cast to
    /// float8 on the way out. With zero reviews the average is absent and
    /// the count is zero.
    pub async fn rating_summary(pool: &PgPool, inv_id: i32) -> Result<RatingSummary, sqlx::Error> {
        let summary = sqlx::query_as::<_, RatingSummary>(
            r#"
            SELECT AVG(review_rating)::float8 AS average_rating,
                   COUNT(*) AS review_count
            FROM review
            WHERE inv_id = $1
            "#,
        )
        .bind(inv_id)
        .fetch_one(pool)
        .await?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_reviewed_display() {
        let err = ReviewError::AlreadyReviewed;
        assert_eq!(err.to_string(), "account has already reviewed this vehicle");
    }

    #[test]
    fn test_rating_summary_empty_means_absent_average() {
        let summary = RatingSummary {
            average_rating: None,
            review_count: 0,
        };

        assert!(summary.average_rating.is_none());
        assert_eq!(summary.review_count, 0);
    }

    // Integration tests for database operations require a running database.
}
