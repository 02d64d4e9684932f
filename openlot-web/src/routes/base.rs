//! Home page and 404 fallback

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Extension,
};
use axum_extra::extract::SignedCookieJar;
use maud::html;

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    flash,
    middleware::identity::Identity,
    routes::site_nav,
    views::layout,
};

/// GET / - home page
pub async fn home(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);
    let identity = identity.as_ref().map(|Extension(identity)| identity);

    let content = html! {
        section .hero {
            h2 { "Own today, drive tomorrow" }
            p {
                "Browse the lot by classification using the navigation above, "
                "or create an account to review the vehicles you know."
            }
        }
    };

    let page = layout::page("Welcome to OpenLot Motors", identity, nav, notice.as_deref(), content);
    Ok((jar, page).into_response())
}

/// Fallback for unmatched routes
///
/// Must stay registered last; renders the fixed 404 message.
pub async fn not_found() -> AppError {
    AppError::NotFound("Sorry, we appear to have lost that page.".to_string())
}
