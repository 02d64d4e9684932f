//! HTML views
//!
//! Every view is a pure function from data to [`maud::Markup`]. Maud
//! escapes interpolated values by default, so user-supplied text (names,
//! review bodies, form echoes) is always entity-encoded on the way out.
//!
//! # Modules
//!
//! - `layout`: page chrome, navigation list, error lists, error pages
//! - `account`: login/registration/management/update views
//! - `inventory`: vehicle grid, detail block, administration forms
//! - `review`: star glyphs, review section, my-reviews and edit/delete views
//! - `format`: currency and number formatting

pub mod account;
pub mod format;
pub mod inventory;
pub mod layout;
pub mod review;
