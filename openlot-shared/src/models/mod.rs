//! Database models for OpenLot
//!
//! This module contains all database models and their query operations.
//!
//! # Models
//!
//! - `account`: Customer and staff accounts
//! - `classification`: Named categories grouping inventory ("Sedan", "SUV")
//! - `inventory`: Vehicles for sale
//! - `review`: Customer reviews of vehicles, one per (account, vehicle)

pub mod account;
pub mod classification;
pub mod inventory;
pub mod review;
