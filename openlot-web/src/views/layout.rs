//! Page chrome: layout, navigation, notices, error pages

use maud::{html, Markup, DOCTYPE};
use openlot_shared::models::classification::Classification;

use crate::middleware::identity::Identity;
use crate::validation::FieldError;

const SITE_NAME: &str = "OpenLot Motors";

/// Builds the navigation list from the classification table
///
/// Derived from the full table on every request; a freshly added
/// classification appears without a restart.
pub fn nav_list(classifications: &[Classification]) -> Markup {
    html! {
        ul {
            li { a href="/" title="Home page" { "Home" } }
            @for row in classifications {
                li {
                    a href=(format!("/inv/type/{}", row.classification_id))
                      title=(format!("See our inventory of {} vehicles", row.classification_name)) {
                        (row.classification_name)
                    }
                }
            }
        }
    }
}

/// Fallback navigation for pages rendered without database access
pub fn static_nav() -> Markup {
    html! {
        ul {
            li { a href="/" title="Home page" { "Home" } }
        }
    }
}

/// Renders a full page with site chrome
///
/// `notice` is the one-shot message taken from the flash cookie; it renders
/// above the page content.
pub fn page(
    title: &str,
    identity: Option<&Identity>,
    nav: Markup,
    notice: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (SITE_NAME) }
                link rel="stylesheet" href="/css/styles.css";
            }
            body {
                header #top-header {
                    a #site-name href="/" { (SITE_NAME) }
                    div #tools {
                        @match identity {
                            Some(identity) => {
                                a href="/account/" title="Account management" {
                                    "Welcome " (identity.first_name)
                                }
                                " | "
                                a href="/account/logout" title="Log out" { "Logout" }
                            }
                            None => {
                                a href="/account/login" title="Click to log in" { "My Account" }
                            }
                        }
                    }
                }
                nav { (nav) }
                main {
                    h1 { (title) }
                    @if let Some(message) = notice {
                        p .notice { (message) }
                    }
                    (content)
                }
                footer {
                    p { "© " (SITE_NAME) ". All vehicles sold as seen." }
                }
            }
        }
    }
}

/// Renders a field-error list, or nothing when the list is empty
pub fn error_list(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul .form-errors {
                @for error in errors {
                    li { (error.message) }
                }
            }
        }
    }
}

/// Renders the error page used for 404s and crashes
///
/// Uses the static navigation so it renders even when the database is the
/// thing that failed.
pub fn error_page(title: &str, message: &str) -> Markup {
    page(
        title,
        None,
        static_nav(),
        None,
        html! {
            p .error-message { (message) }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifications() -> Vec<Classification> {
        vec![
            Classification {
                classification_id: 1,
                classification_name: "Sedan".to_string(),
            },
            Classification {
                classification_id: 2,
                classification_name: "SUV".to_string(),
            },
        ]
    }

    #[test]
    fn test_nav_list_links_each_classification() {
        let markup = nav_list(&classifications()).into_string();

        assert!(markup.contains(r#"href="/inv/type/1""#));
        assert!(markup.contains(r#"href="/inv/type/2""#));
        assert!(markup.contains("Sedan"));
        assert!(markup.contains(r#"href="/" title="Home page""#));
    }

    #[test]
    fn test_page_shows_notice_once_present() {
        let markup = page(
            "Login",
            None,
            static_nav(),
            Some("Please log in."),
            html! {},
        )
        .into_string();

        assert!(markup.contains(r#"<p class="notice">Please log in.</p>"#));
    }

    #[test]
    fn test_page_escapes_notice() {
        let markup = page(
            "Login",
            None,
            static_nav(),
            Some("<script>alert(1)</script>"),
            html! {},
        )
        .into_string();

        assert!(!markup.contains("<script>alert(1)</script>"));
        assert!(markup.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_error_list_empty_renders_nothing() {
        assert_eq!(error_list(&[]).into_string(), "");
    }

    #[test]
    fn test_error_page_carries_message() {
        let markup = error_page("404", "Sorry, we appear to have lost that page.").into_string();
        assert!(markup.contains("Sorry, we appear to have lost that page."));
    }
}
