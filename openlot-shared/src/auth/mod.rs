//! Authentication utilities
//!
//! This module provides the auth primitives for OpenLot:
//!
//! # Modules
//!
//! - [`password`]: Argon2id password hashing and strength validation
//! - [`jwt`]: Signed identity tokens carried in the `jwt` cookie
//!
//! # Security Features
//!
//! - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
//! - **Identity Tokens**: HS256 signing with a fixed one-hour expiry
//! - **Constant-time Comparison**: Password verification uses constant-time
//!   operations

pub mod jwt;
pub mod password;
