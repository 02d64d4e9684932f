//! Review views: star glyphs, the detail-page review section, and the
//! my-reviews, edit, and delete views

use maud::{html, Markup};
use openlot_shared::models::review::{RatingSummary, ReviewWithAuthor, ReviewWithVehicle};

use crate::middleware::identity::Identity;
use crate::validation::FieldError;
use crate::views::layout;

/// Sticky values for the add/edit review form
#[derive(Debug, Default)]
pub struct ReviewFormValues {
    pub review_text: String,
    pub review_rating: Option<i32>,
}

/// Renders a rating as star glyphs
///
/// floor(rating) filled stars, one half star when the fractional part is at
/// least 0.5, padded with empty stars up to five.
pub fn stars(rating: f64) -> Markup {
    let full = (rating.floor() as i32).clamp(0, 5);
    let half = i32::from(full < 5 && rating - f64::from(full) >= 0.5);
    let empty = 5 - full - half;

    html! {
        span .stars aria-label=(format!("{:.1} out of 5 stars", rating)) {
            @for _ in 0..full { span .star .star--full { "★" } }
            @if half == 1 { span .star .star--half { "★" } }
            @for _ in 0..empty { span .star .star--empty { "☆" } }
        }
    }
}

/// Aggregate rating header for a vehicle
///
/// With zero reviews the average is absent: no filled stars, "No reviews
/// yet" text, and nothing crashes.
pub fn rating_header(summary: &RatingSummary) -> Markup {
    html! {
        div .rating-summary {
            @match summary.average_rating {
                Some(average) => {
                    (stars(average))
                    span .rating-average { (format!("{:.1}", average)) }
                    span .rating-count {
                        (summary.review_count)
                        @if summary.review_count == 1 { " review" } @else { " reviews" }
                    }
                }
                None => {
                    (stars(0.0))
                    span .rating-count { "No reviews yet" }
                }
            }
        }
    }
}

/// The add-review form shown on the detail page
fn review_form(inv_id: i32, values: &ReviewFormValues, errors: &[FieldError]) -> Markup {
    html! {
        (layout::error_list(errors))
        form #add-review-form method="post" action="/review/add" {
            fieldset {
                legend { "Write a review" }
                (rating_select(values.review_rating))
                label for="review_text" { "Your review" }
                textarea name="review_text" id="review_text" rows="5"
                         minlength="10" maxlength="1000" required {
                    (values.review_text)
                }
                input type="hidden" name="inv_id" value=(inv_id);
                button type="submit" { "Submit Review" }
            }
        }
    }
}

/// Rating dropdown shared by the add and edit forms
fn rating_select(selected: Option<i32>) -> Markup {
    html! {
        label for="review_rating" { "Rating" }
        select name="review_rating" id="review_rating" required {
            option value="" disabled selected[selected.is_none()] { "Choose a rating" }
            @for value in (1..=5).rev() {
                option value=(value) selected[selected == Some(value)] {
                    (value)
                    @if value == 1 { " star" } @else { " stars" }
                }
            }
        }
    }
}

/// The full review section of the vehicle detail page
///
/// Shows the aggregate header and review list for everyone. Logged-in
/// visitors who have not reviewed the vehicle get the add form; those who
/// have get a pointer to their existing review; anonymous visitors get a
/// login prompt.
pub fn section(
    inv_id: i32,
    reviews: &[ReviewWithAuthor],
    summary: &RatingSummary,
    identity: Option<&Identity>,
    has_reviewed: bool,
    values: &ReviewFormValues,
    errors: &[FieldError],
) -> Markup {
    html! {
        section #reviews {
            h3 { "Customer Reviews" }
            (rating_header(summary))
            @if reviews.is_empty() {
                p { "Be the first to review this vehicle." }
            } @else {
                ul .review-list {
                    @for review in reviews {
                        li .review {
                            (stars(f64::from(review.review_rating)))
                            p .review-text { (review.review_text) }
                            p .review-byline {
                                "by " (review.account_firstname) " " (review.account_lastname)
                                " on " (review.review_date.format("%B %-d, %Y"))
                            }
                        }
                    }
                }
            }
            @match identity {
                Some(_) => {
                    @if has_reviewed {
                        p .notice {
                            "You have already reviewed this vehicle. "
                            a href="/review/user" { "Edit your review" }
                            "."
                        }
                    } @else {
                        (review_form(inv_id, values, errors))
                    }
                }
                None => {
                    p {
                        a href="/account/login" { "Log in" }
                        " to write a review."
                    }
                }
            }
        }
    }
}

/// The "my reviews" list with edit/delete actions
pub fn user_reviews(reviews: &[ReviewWithVehicle]) -> Markup {
    html! {
        @if reviews.is_empty() {
            p { "You haven't reviewed any vehicles yet." }
        } @else {
            ul .review-list {
                @for review in reviews {
                    li .review {
                        h3 {
                            (review.inv_year.trim()) " " (review.inv_make) " " (review.inv_model)
                        }
                        (stars(f64::from(review.review_rating)))
                        p .review-text { (review.review_text) }
                        p .review-byline {
                            "written on " (review.review_date.format("%B %-d, %Y"))
                        }
                        p .review-actions {
                            a href=(format!("/review/edit/{}", review.review_id)) { "Edit" }
                            " | "
                            a href=(format!("/review/delete/{}", review.review_id)) { "Delete" }
                        }
                    }
                }
            }
        }
    }
}

/// Edit-review form
pub fn edit_form(review_id: i32, values: &ReviewFormValues, errors: &[FieldError]) -> Markup {
    html! {
        (layout::error_list(errors))
        form #edit-review-form method="post" action="/review/update" {
            fieldset {
                legend { "Edit your review" }
                (rating_select(values.review_rating))
                label for="review_text" { "Your review" }
                textarea name="review_text" id="review_text" rows="5"
                         minlength="10" maxlength="1000" required {
                    (values.review_text)
                }
                input type="hidden" name="review_id" value=(review_id);
                button type="submit" { "Update Review" }
            }
        }
    }
}

/// Delete-review confirmation: a static summary plus the confirming form
pub fn delete_confirm(review: &ReviewWithVehicle) -> Markup {
    html! {
        p .warning { "Confirm deletion. The delete is permanent." }
        div .review {
            (stars(f64::from(review.review_rating)))
            p .review-text { (review.review_text) }
        }
        form #delete-review-form method="post" action="/review/delete" {
            input type="hidden" name="review_id" value=(review.review_id);
            button type="submit" { "Delete Review" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_stars_three_point_seven() {
        let markup = stars(3.7).into_string();
        assert_eq!(count(&markup, "star--full"), 3);
        assert_eq!(count(&markup, "star--half"), 1);
        assert_eq!(count(&markup, "star--empty"), 1);
    }

    #[test]
    fn test_stars_five() {
        let markup = stars(5.0).into_string();
        assert_eq!(count(&markup, "star--full"), 5);
        assert_eq!(count(&markup, "star--half"), 0);
        assert_eq!(count(&markup, "star--empty"), 0);
    }

    #[test]
    fn test_stars_zero() {
        let markup = stars(0.0).into_string();
        assert_eq!(count(&markup, "star--full"), 0);
        assert_eq!(count(&markup, "star--half"), 0);
        assert_eq!(count(&markup, "star--empty"), 5);
    }

    #[test]
    fn test_stars_fraction_below_half_rounds_down() {
        let markup = stars(2.4).into_string();
        assert_eq!(count(&markup, "star--full"), 2);
        assert_eq!(count(&markup, "star--half"), 0);
        assert_eq!(count(&markup, "star--empty"), 3);
    }

    #[test]
    fn test_rating_header_zero_reviews() {
        let summary = RatingSummary {
            average_rating: None,
            review_count: 0,
        };

        let markup = rating_header(&summary).into_string();
        assert!(markup.contains("No reviews yet"));
        assert_eq!(count(&markup, "star--empty"), 5);
    }

    #[test]
    fn test_rating_header_rounds_to_one_decimal() {
        let summary = RatingSummary {
            average_rating: Some(11.0 / 3.0),
            review_count: 3,
        };

        let markup = rating_header(&summary).into_string();
        assert!(markup.contains("3.7"));
        assert!(markup.contains("3 reviews"));
    }

    fn sample_review() -> ReviewWithAuthor {
        ReviewWithAuthor {
            review_id: 1,
            inv_id: 10,
            account_id: 4,
            review_text: "Great car, smooth ride. <img src=x>".to_string(),
            review_rating: 5,
            review_date: Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap(),
            account_firstname: "Dana".to_string(),
            account_lastname: "Whitmer".to_string(),
        }
    }

    fn empty_summary() -> RatingSummary {
        RatingSummary {
            average_rating: Some(5.0),
            review_count: 1,
        }
    }

    #[test]
    fn test_section_escapes_review_text() {
        let markup = section(
            10,
            &[sample_review()],
            &empty_summary(),
            None,
            false,
            &ReviewFormValues::default(),
            &[],
        )
        .into_string();

        assert!(!markup.contains("<img src=x>"));
        assert!(markup.contains("&lt;img src=x&gt;"));
    }

    #[test]
    fn test_section_prompts_login_when_anonymous() {
        let markup = section(
            10,
            &[],
            &RatingSummary {
                average_rating: None,
                review_count: 0,
            },
            None,
            false,
            &ReviewFormValues::default(),
            &[],
        )
        .into_string();

        assert!(markup.contains("to write a review"));
        assert!(!markup.contains("add-review-form"));
    }

    #[test]
    fn test_user_reviews_render_actions() {
        let review = ReviewWithVehicle {
            review_id: 7,
            inv_id: 10,
            account_id: 4,
            review_text: "Still running strong after a year.".to_string(),
            review_rating: 4,
            review_date: Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap(),
            inv_make: "Jeep".to_string(),
            inv_model: "Wrangler".to_string(),
            inv_year: "2019".to_string(),
        };

        let markup = user_reviews(&[review]).into_string();
        assert!(markup.contains(r#"href="/review/edit/7""#));
        assert!(markup.contains(r#"href="/review/delete/7""#));
        assert!(markup.contains("2019 Jeep Wrangler"));
    }

    #[test]
    fn test_edit_form_preselects_rating() {
        let values = ReviewFormValues {
            review_text: "A solid pick for winter roads.".to_string(),
            review_rating: Some(4),
        };

        let markup = edit_form(7, &values, &[]).into_string();
        assert!(markup.contains(r#"<option value="4" selected>"#));
        assert!(markup.contains("A solid pick for winter roads."));
        assert!(markup.contains(r#"name="review_id" value="7""#));
    }
}
