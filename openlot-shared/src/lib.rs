//! # OpenLot Shared Library
//!
//! This crate contains the data layer and auth primitives used by the
//! OpenLot web server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their query operations
//! - `auth`: Password hashing and identity-token utilities
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the OpenLot shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
