//! Review controllers
//!
//! All routes here sit behind the login guard. Ownership is checked on
//! every edit/update/delete against the fetched row, and a missing review
//! and someone else's review produce the same redirect and notice so the
//! response does not reveal which one it was.
//!
//! # Endpoints
//!
//! - `POST /review/add` - add a review for a vehicle
//! - `GET  /review/user` - the current account's reviews
//! - `GET  /review/edit/:review_id`, `POST /review/update`
//! - `GET  /review/delete/:review_id`, `POST /review/delete`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use validator::Validate;

use openlot_shared::models::review::{Review, ReviewError, ReviewWithVehicle};

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    flash,
    middleware::identity::Identity,
    routes::{inventory::render_detail_page, site_nav},
    validation::{collect_errors, parse_int_min, FieldError},
    views::{self, layout, review::ReviewFormValues},
};

const ALREADY_REVIEWED: &str =
    "You have already reviewed this vehicle. You can edit your existing review.";

/// Add-review form payload
#[derive(Debug, Deserialize, Validate)]
pub struct AddReviewForm {
    pub inv_id: String,

    #[validate(length(min = 10, max = 1000, message = "Review must be between 10 and 1000 characters."))]
    pub review_text: String,

    pub review_rating: String,
}

/// Edit-review form payload
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReviewForm {
    pub review_id: String,

    #[validate(length(min = 10, max = 1000, message = "Review must be between 10 and 1000 characters."))]
    pub review_text: String,

    pub review_rating: String,
}

/// Delete-review form payload
#[derive(Debug, Deserialize)]
pub struct DeleteReviewForm {
    pub review_id: String,
}

/// Validates the text/rating pair shared by the add and edit forms
fn review_values(
    text: &str,
    rating_raw: &str,
    shape_result: Result<(), validator::ValidationErrors>,
) -> (ReviewFormValues, Vec<FieldError>) {
    let mut errors = collect_errors(shape_result);

    let rating = parse_int_min(rating_raw, 1).filter(|r| *r <= 5);
    if rating.is_none() {
        errors.push(FieldError::new(
            "review_rating",
            "Rating must be between 1 and 5.",
        ));
    }

    (
        ReviewFormValues {
            review_text: text.to_string(),
            review_rating: rating,
        },
        errors,
    )
}

/// POST /review/add
pub async fn add_review(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
    Form(form): Form<AddReviewForm>,
) -> AppResult<Response> {
    let inv_id = parse_int_min(&form.inv_id, 1)
        .ok_or_else(|| AppError::NotFound("Sorry, we appear to have lost that page.".to_string()))?;
    let detail_url = format!("/inv/detail/{}", inv_id);

    let (values, errors) = review_values(&form.review_text, &form.review_rating, form.validate());
    if !errors.is_empty() {
        return render_detail_page(
            &state,
            Some(&identity),
            jar,
            inv_id,
            &values,
            &errors,
            None,
            StatusCode::OK,
        )
        .await;
    }

    // Friendly pre-check; the unique constraint still decides under
    // concurrency.
    if Review::has_reviewed(&state.db, inv_id, identity.account_id).await? {
        let jar = flash::set_notice(jar, ALREADY_REVIEWED);
        return Ok((jar, Redirect::to(&detail_url)).into_response());
    }

    let rating = values.review_rating.unwrap_or_default();
    match Review::create(&state.db, inv_id, identity.account_id, form.review_text.trim(), rating)
        .await
    {
        Ok(_) => {
            let jar = flash::set_notice(jar, "Review submitted successfully!");
            Ok((jar, Redirect::to(&detail_url)).into_response())
        }
        Err(ReviewError::AlreadyReviewed) => {
            let jar = flash::set_notice(jar, ALREADY_REVIEWED);
            Ok((jar, Redirect::to(&detail_url)).into_response())
        }
        Err(ReviewError::Database(e)) => {
            tracing::error!("review insert failed: {}", e);
            render_detail_page(
                &state,
                Some(&identity),
                jar,
                inv_id,
                &values,
                &[],
                Some("Sorry, submitting the review failed.".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await
        }
    }
}

/// GET /review/user - the current account's reviews
pub async fn build_user_reviews(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);

    let reviews = Review::list_by_account(&state.db, identity.account_id).await?;
    let content = views::review::user_reviews(&reviews);
    let page = layout::page("My Reviews", Some(&identity), nav, notice.as_deref(), content);
    Ok((jar, page).into_response())
}

/// Fetches a review and checks it belongs to the current account
///
/// Absent and not-owned collapse into one outcome on purpose: the caller
/// redirects to "my reviews" with a notice that does not distinguish the
/// two cases.
async fn owned_review(
    state: &AppState,
    identity: &Identity,
    review_id: i32,
) -> AppResult<Option<ReviewWithVehicle>> {
    let review = Review::find_by_id(&state.db, review_id).await?;
    Ok(review.filter(|review| review.account_id == identity.account_id))
}

/// Redirect used for every failed ownership gate
fn permission_redirect(jar: SignedCookieJar, action: &str) -> Response {
    let jar = flash::set_notice(
        jar,
        format!("You do not have permission to {} this review.", action),
    );
    (jar, Redirect::to("/review/user")).into_response()
}

/// GET /review/edit/:review_id
pub async fn build_edit_review(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(review_id): Path<i32>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let Some(review) = owned_review(&state, &identity, review_id).await? else {
        return Ok(permission_redirect(jar, "edit"));
    };

    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);

    let values = ReviewFormValues {
        review_text: review.review_text.clone(),
        review_rating: Some(review.review_rating),
    };
    let title = format!(
        "Edit Review - {} {} {}",
        review.inv_year.trim(),
        review.inv_make,
        review.inv_model
    );

    let content = views::review::edit_form(review.review_id, &values, &[]);
    let page = layout::page(&title, Some(&identity), nav, notice.as_deref(), content);
    Ok((jar, page).into_response())
}

/// POST /review/update
pub async fn update_review(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
    Form(form): Form<UpdateReviewForm>,
) -> AppResult<Response> {
    let Some(review_id) = parse_int_min(&form.review_id, 1) else {
        return Ok(permission_redirect(jar, "edit"));
    };
    let Some(review) = owned_review(&state, &identity, review_id).await? else {
        return Ok(permission_redirect(jar, "edit"));
    };

    let (values, errors) = review_values(&form.review_text, &form.review_rating, form.validate());
    let title = format!(
        "Edit Review - {} {} {}",
        review.inv_year.trim(),
        review.inv_make,
        review.inv_model
    );

    if !errors.is_empty() {
        let nav = site_nav(&state).await?;
        let content = views::review::edit_form(review_id, &values, &errors);
        let page = layout::page(&title, Some(&identity), nav, None, content);
        return Ok((jar, page).into_response());
    }

    let rating = values.review_rating.unwrap_or_default();
    match Review::update(&state.db, review_id, form.review_text.trim(), rating).await {
        Ok(true) => {
            let jar = flash::set_notice(jar, "Review updated successfully!");
            Ok((jar, Redirect::to("/review/user")).into_response())
        }
        Ok(false) | Err(_) => {
            let nav = site_nav(&state).await?;
            let content = views::review::edit_form(review_id, &values, &[]);
            let page = layout::page(
                &title,
                Some(&identity),
                nav,
                Some("Sorry, updating the review failed."),
                content,
            );
            Ok((jar, (StatusCode::INTERNAL_SERVER_ERROR, page)).into_response())
        }
    }
}

/// GET /review/delete/:review_id - confirmation view
pub async fn build_delete_review(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(review_id): Path<i32>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let Some(review) = owned_review(&state, &identity, review_id).await? else {
        return Ok(permission_redirect(jar, "delete"));
    };

    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);

    let title = format!(
        "Delete Review - {} {} {}",
        review.inv_year.trim(),
        review.inv_make,
        review.inv_model
    );
    let content = views::review::delete_confirm(&review);
    let page = layout::page(&title, Some(&identity), nav, notice.as_deref(), content);
    Ok((jar, page).into_response())
}

/// POST /review/delete
///
/// Re-checks ownership immediately before the delete; the confirmation view
/// is only a rendering step.
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
    Form(form): Form<DeleteReviewForm>,
) -> AppResult<Response> {
    let Some(review_id) = parse_int_min(&form.review_id, 1) else {
        return Ok(permission_redirect(jar, "delete"));
    };
    let Some(review) = owned_review(&state, &identity, review_id).await? else {
        return Ok(permission_redirect(jar, "delete"));
    };

    match Review::delete(&state.db, review_id).await {
        Ok(true) => {
            let jar = flash::set_notice(jar, "Review deleted successfully!");
            Ok((jar, Redirect::to("/review/user")).into_response())
        }
        Ok(false) | Err(_) => {
            let nav = site_nav(&state).await?;
            let title = format!(
                "Delete Review - {} {} {}",
                review.inv_year.trim(),
                review.inv_make,
                review.inv_model
            );
            let content = views::review::delete_confirm(&review);
            let page = layout::page(
                &title,
                Some(&identity),
                nav,
                Some("Sorry, deleting the review failed."),
                content,
            );
            Ok((jar, (StatusCode::INTERNAL_SERVER_ERROR, page)).into_response())
        }
    }
}
