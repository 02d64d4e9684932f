//! Inventory model and database operations
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE inventory (
//!     inv_id SERIAL PRIMARY KEY,
//!     classification_id INTEGER NOT NULL REFERENCES classification (classification_id),
//!     inv_make VARCHAR(50) NOT NULL,
//!     inv_model VARCHAR(50) NOT NULL,
//!     inv_year CHAR(4) NOT NULL,
//!     inv_description TEXT NOT NULL,
//!     inv_image VARCHAR(255) NOT NULL,
//!     inv_thumbnail VARCHAR(255) NOT NULL,
//!     inv_price DOUBLE PRECISION NOT NULL CHECK (inv_price >= 0),
//!     inv_miles INTEGER NOT NULL CHECK (inv_miles >= 0),
//!     inv_color VARCHAR(30) NOT NULL
//! );
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A vehicle offered by the dealership
///
/// Serialized as-is by the `/inv/getInventory/:classification_id` JSON
/// endpoint, so field names match the column names the client-side table
/// expects.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vehicle {
    /// Unique inventory ID
    pub inv_id: i32,

    /// Owning classification
    pub classification_id: i32,

    /// Manufacturer
    pub inv_make: String,

    /// Model name
    pub inv_model: String,

    /// Model year, exactly four digits
    pub inv_year: String,

    /// Free-text description
    pub inv_description: String,

    /// Full-size image path
    pub inv_image: String,

    /// Thumbnail image path
    pub inv_thumbnail: String,

    /// Asking price in dollars, non-negative
    pub inv_price: f64,

    /// Odometer reading, non-negative
    pub inv_miles: i32,

    /// Exterior color
    pub inv_color: String,
}

/// Field values for creating or updating a vehicle
///
/// Mirrors the vehicle form; validation happens in the web layer before
/// this ever reaches the database.
#[derive(Debug, Clone)]
pub struct VehicleData {
    pub classification_id: i32,
    pub inv_make: String,
    pub inv_model: String,
    pub inv_year: String,
    pub inv_description: String,
    pub inv_image: String,
    pub inv_thumbnail: String,
    pub inv_price: f64,
    pub inv_miles: i32,
    pub inv_color: String,
}

impl Vehicle {
    /// Lists all vehicles in a classification, ordered by make and model
    pub async fn list_by_classification(
        pool: &PgPool,
        classification_id: i32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT inv_id, classification_id, inv_make, inv_model, inv_year,
                   inv_description, inv_image, inv_thumbnail, inv_price, inv_miles, inv_color
            FROM inventory
            WHERE classification_id = $1
            ORDER BY inv_make, inv_model
            "#,
        )
        .bind(classification_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Finds a vehicle by ID
    pub async fn find_by_id(pool: &PgPool, inv_id: i32) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT inv_id, classification_id, inv_make, inv_model, inv_year,
                   inv_description, inv_image, inv_thumbnail, inv_price, inv_miles, inv_color
            FROM inventory
            WHERE inv_id = $1
            "#,
        )
        .bind(inv_id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Creates a new vehicle
    pub async fn create(pool: &PgPool, data: &VehicleData) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO inventory (classification_id, inv_make, inv_model, inv_year,
                                   inv_description, inv_image, inv_thumbnail, inv_price,
                                   inv_miles, inv_color)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING inv_id, classification_id, inv_make, inv_model, inv_year,
                      inv_description, inv_image, inv_thumbnail, inv_price, inv_miles, inv_color
            "#,
        )
        .bind(data.classification_id)
        .bind(&data.inv_make)
        .bind(&data.inv_model)
        .bind(&data.inv_year)
        .bind(&data.inv_description)
        .bind(&data.inv_image)
        .bind(&data.inv_thumbnail)
        .bind(data.inv_price)
        .bind(data.inv_miles)
        .bind(&data.inv_color)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// Updates an existing vehicle by ID
    ///
    /// Returns the updated row, or None if the vehicle doesn't exist.
    pub async fn update(
        pool: &PgPool,
        inv_id: i32,
        data: &VehicleData,
    ) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE inventory
            SET classification_id = $2, inv_make = $3, inv_model = $4, inv_year = $5,
                inv_description = $6, inv_image = $7, inv_thumbnail = $8, inv_price = $9,
                inv_miles = $10, inv_color = $11
            WHERE inv_id = $1
            RETURNING inv_id, classification_id, inv_make, inv_model, inv_year,
                      inv_description, inv_image, inv_thumbnail, inv_price, inv_miles, inv_color
            "#,
        )
        .bind(inv_id)
        .bind(data.classification_id)
        .bind(&data.inv_make)
        .bind(&data.inv_model)
        .bind(&data.inv_year)
        .bind(&data.inv_description)
        .bind(&data.inv_image)
        .bind(&data.inv_thumbnail)
        .bind(data.inv_price)
        .bind(data.inv_miles)
        .bind(&data.inv_color)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Deletes a vehicle by ID
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, inv_id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inventory WHERE inv_id = $1")
            .bind(inv_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_serializes_with_column_names() {
        let vehicle = Vehicle {
            inv_id: 10,
            classification_id: 2,
            inv_make: "DMC".to_string(),
            inv_model: "DeLorean".to_string(),
            inv_year: "1981".to_string(),
            inv_description: "Gull-wing doors.".to_string(),
            inv_image: "/images/vehicles/delorean.jpg".to_string(),
            inv_thumbnail: "/images/vehicles/delorean-tn.jpg".to_string(),
            inv_price: 24999.0,
            inv_miles: 88000,
            inv_color: "Silver".to_string(),
        };

        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["inv_make"], "DMC");
        assert_eq!(json["inv_miles"], 88000);
    }
}
