//! Route handlers
//!
//! Handlers are organized by resource, mirroring the URL space:
//!
//! - `base`: home page and the 404 fallback
//! - `account`: registration, login, profile management
//! - `inventory`: public browsing and staff administration
//! - `review`: the customer review subsystem
//!
//! Every handler follows the same shape: fetch supporting data, run the
//! form's validation rules, call the model layer, then either render a page
//! or redirect with a one-shot notice.

use maud::Markup;
use openlot_shared::models::classification::Classification;

use crate::{app::AppState, error::AppResult, views};

pub mod account;
pub mod base;
pub mod inventory;
pub mod review;

/// Builds the site navigation from the classification table
///
/// Called by every rendering handler; the list is derived per request, not
/// cached.
pub(crate) async fn site_nav(state: &AppState) -> AppResult<Markup> {
    let classifications = Classification::list_all(&state.db).await?;
    Ok(views::layout::nav_list(&classifications))
}
