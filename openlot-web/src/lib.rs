//! # OpenLot Web Server Library
//!
//! Server-rendered dealership storefront: inventory browsing by
//! classification, vehicle detail pages, account self-service, and the
//! customer review subsystem.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTML error pages
//! - `flash`: One-shot notice messages
//! - `middleware`: Identity decoding, guards, security headers
//! - `routes`: Request handlers
//! - `validation`: Form validation support
//! - `views`: HTML rendering

pub mod app;
pub mod config;
pub mod error;
pub mod flash;
pub mod middleware;
pub mod routes;
pub mod validation;
pub mod views;
