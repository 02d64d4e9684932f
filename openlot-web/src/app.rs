//! Application state and router builder
//!
//! This module defines the shared application state and provides a function
//! to build the axum router with all routes and middleware.
//!
//! # Architecture
//!
//! ```text
//! /
//! ├── /                          # Home page (public)
//! ├── /account/                  # Registration, login, profile
//! │   ├── GET/POST /login, /register, GET /logout   (public)
//! │   └── GET /, /update/:id, POST /update, /change-password  (login)
//! ├── /inv/                      # Inventory
//! │   ├── GET /type/:id, /detail/:id, /getInventory/:id       (public)
//! │   └── management + mutations                   (employee/admin)
//! ├── /review/                   # Review subsystem (login)
//! └── /css, /images              # Static assets
//! ```
//!
//! # Middleware Stack
//!
//! Applied outermost first: security headers, request tracing, then the
//! identity layer that decodes the token cookie for every request. The
//! login/role guards are attached per sub-router.

use crate::{
    config::Config,
    middleware::{identity, security::SecurityHeadersLayer},
    routes,
};
use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::Key;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via axum's `State` extractor. The pool
/// is the only cross-request shared resource.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Key for the signed notice cookie
    cookie_key: Key,
}

impl AppState {
    /// Creates new application state
    ///
    /// # Panics
    ///
    /// Panics if the session secret is shorter than the cookie key
    /// requires; `Config::from_env` enforces the length first.
    pub fn new(db: PgPool, config: Config) -> Self {
        let cookie_key = Key::from(config.secrets.session_secret.as_bytes());
        Self {
            db,
            config: Arc::new(config),
            cookie_key,
        }
    }

    /// The signing key for the notice cookie
    pub fn cookie_key(&self) -> Key {
        self.cookie_key.clone()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.cookie_key.clone()
    }
}

/// Builds the complete axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let account_public = Router::new()
        .route(
            "/login",
            get(routes::account::build_login).post(routes::account::login),
        )
        .route(
            "/register",
            get(routes::account::build_register).post(routes::account::register),
        )
        .route("/logout", get(routes::account::logout));

    let account_protected = Router::new()
        .route("/", get(routes::account::management))
        .route("/update/:account_id", get(routes::account::build_update))
        .route("/update", post(routes::account::update_profile))
        .route("/change-password", post(routes::account::change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            identity::require_login,
        ));

    let inventory_public = Router::new()
        .route(
            "/type/:classification_id",
            get(routes::inventory::build_by_classification),
        )
        .route(
            "/detail/:inventory_id",
            get(routes::inventory::build_detail),
        )
        .route(
            "/getInventory/:classification_id",
            get(routes::inventory::inventory_json),
        );

    let inventory_admin = Router::new()
        .route("/", get(routes::inventory::management))
        .route(
            "/add-classification",
            get(routes::inventory::build_add_classification)
                .post(routes::inventory::add_classification),
        )
        .route(
            "/add-inventory",
            get(routes::inventory::build_add_inventory).post(routes::inventory::add_inventory),
        )
        .route("/edit/:inventory_id", get(routes::inventory::build_edit))
        .route("/update", post(routes::inventory::update_inventory))
        .route("/delete/:inventory_id", get(routes::inventory::build_delete))
        .route("/delete", post(routes::inventory::delete_inventory))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            identity::require_employee,
        ));

    let review_routes = Router::new()
        .route("/add", post(routes::review::add_review))
        .route("/user", get(routes::review::build_user_reviews))
        .route("/edit/:review_id", get(routes::review::build_edit_review))
        .route("/update", post(routes::review::update_review))
        .route(
            "/delete/:review_id",
            get(routes::review::build_delete_review),
        )
        .route("/delete", post(routes::review::delete_review))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            identity::require_login,
        ));

    Router::new()
        .route("/", get(routes::base::home))
        .nest("/account", account_public.merge(account_protected))
        .nest("/inv", inventory_public.merge(inventory_admin))
        .nest("/review", review_routes)
        .nest_service("/css", ServeDir::new("public/css"))
        .nest_service("/images", ServeDir::new("public/images"))
        .fallback(routes::base::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            identity::identity_layer,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(state.config.production))
        .with_state(state)
}
