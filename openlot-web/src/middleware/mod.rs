//! Middleware modules for the web server
//!
//! - `identity`: decodes the `jwt` cookie into per-request identity and
//!   provides the login/role guards
//! - `security`: security response headers

pub mod identity;
pub mod security;
