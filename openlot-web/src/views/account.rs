//! Account views: login, registration, management, update

use maud::{html, Markup};

use crate::middleware::identity::Identity;
use crate::validation::FieldError;
use crate::views::layout;

/// Sticky values for the login form
///
/// Only the email is echoed back; the password never is.
#[derive(Debug, Default)]
pub struct LoginFormValues {
    pub account_email: String,
}

/// Sticky values for the registration form
#[derive(Debug, Default)]
pub struct RegisterFormValues {
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
}

/// Sticky values for the account update form
#[derive(Debug, Default)]
pub struct UpdateFormValues {
    pub account_id: i32,
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
}

/// Login form
pub fn login_form(values: &LoginFormValues, errors: &[FieldError]) -> Markup {
    html! {
        (layout::error_list(errors))
        form #login-form method="post" action="/account/login" {
            fieldset {
                legend { "Log in to your account" }
                label for="account_email" { "Email address" }
                input type="email" name="account_email" id="account_email"
                      value=(values.account_email) required;
                label for="account_password" { "Password" }
                input type="password" name="account_password" id="account_password" required;
                button type="submit" { "Login" }
            }
        }
        p {
            "No account yet? "
            a href="/account/register" { "Sign up" }
        }
    }
}

/// Registration form
pub fn register_form(values: &RegisterFormValues, errors: &[FieldError]) -> Markup {
    html! {
        (layout::error_list(errors))
        form #register-form method="post" action="/account/register" {
            fieldset {
                legend { "Create an account" }
                label for="account_firstname" { "First name" }
                input type="text" name="account_firstname" id="account_firstname"
                      value=(values.account_firstname) required;
                label for="account_lastname" { "Last name" }
                input type="text" name="account_lastname" id="account_lastname"
                      value=(values.account_lastname) required;
                label for="account_email" { "Email address" }
                input type="email" name="account_email" id="account_email"
                      value=(values.account_email) required;
                label for="account_password" { "Password" }
                input type="password" name="account_password" id="account_password" required;
                p .form-hint {
                    "Passwords must be at least 12 characters and contain an uppercase letter, "
                    "a number, and a special character."
                }
                button type="submit" { "Register" }
            }
        }
    }
}

/// Account management (home) page
pub fn management(identity: &Identity) -> Markup {
    html! {
        h2 { "Welcome " (identity.first_name) }
        ul .account-links {
            li {
                a href=(format!("/account/update/{}", identity.account_id)) {
                    "Update account information"
                }
            }
            li { a href="/review/user" { "My reviews" } }
            @if identity.is_privileged() {
                li {
                    h3 { "Inventory Management" }
                    a href="/inv/" { "Manage inventory" }
                }
            }
        }
    }
}

/// Account update page: profile form plus password-change form
pub fn update_forms(values: &UpdateFormValues, errors: &[FieldError]) -> Markup {
    html! {
        (layout::error_list(errors))
        form #update-account-form method="post" action="/account/update" {
            fieldset {
                legend { "Account Update" }
                label for="account_firstname" { "First name" }
                input type="text" name="account_firstname" id="account_firstname"
                      value=(values.account_firstname) required;
                label for="account_lastname" { "Last name" }
                input type="text" name="account_lastname" id="account_lastname"
                      value=(values.account_lastname) required;
                label for="account_email" { "Email address" }
                input type="email" name="account_email" id="account_email"
                      value=(values.account_email) required;
                input type="hidden" name="account_id" value=(values.account_id);
                button type="submit" { "Update Account" }
            }
        }
        form #change-password-form method="post" action="/account/change-password" {
            fieldset {
                legend { "Change Password" }
                p .form-hint {
                    "Entering a new password replaces your current one. Passwords must be "
                    "at least 12 characters and contain an uppercase letter, a number, and "
                    "a special character."
                }
                label for="account_password" { "New password" }
                input type="password" name="account_password" id="account_password" required;
                input type="hidden" name="account_id" value=(values.account_id);
                button type="submit" { "Change Password" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openlot_shared::models::account::AccountType;

    #[test]
    fn test_login_form_preserves_email() {
        let values = LoginFormValues {
            account_email: "pat@example.com".to_string(),
        };

        let markup = login_form(&values, &[]).into_string();
        assert!(markup.contains(r#"value="pat@example.com""#));
        // Password inputs never carry a value attribute.
        assert!(!markup.contains(r#"name="account_password" id="account_password" value="#));
    }

    #[test]
    fn test_register_form_escapes_sticky_values() {
        let values = RegisterFormValues {
            account_firstname: r#""><script>x</script>"#.to_string(),
            ..Default::default()
        };

        let markup = register_form(&values, &[]).into_string();
        assert!(!markup.contains("<script>x</script>"));
    }

    #[test]
    fn test_management_links_inventory_for_staff_only() {
        let mut identity = Identity {
            account_id: 3,
            first_name: "Lee".to_string(),
            last_name: "Ray".to_string(),
            email: "lee@example.com".to_string(),
            account_type: AccountType::Client,
        };

        let markup = management(&identity).into_string();
        assert!(!markup.contains(r#"href="/inv/""#));

        identity.account_type = AccountType::Employee;
        let markup = management(&identity).into_string();
        assert!(markup.contains(r#"href="/inv/""#));
    }

    #[test]
    fn test_update_forms_carry_hidden_account_id() {
        let values = UpdateFormValues {
            account_id: 42,
            ..Default::default()
        };

        let markup = update_forms(&values, &[]).into_string();
        assert_eq!(markup.matches(r#"name="account_id" value="42""#).count(), 2);
    }

    #[test]
    fn test_errors_render_above_form() {
        let errors = vec![
            FieldError::new("account_email", "A valid email is required."),
            FieldError::new("account_firstname", "First name is required."),
        ];

        let markup = register_form(&RegisterFormValues::default(), &errors).into_string();
        assert!(markup.contains("A valid email is required."));
        assert!(markup.contains("First name is required."));
    }
}
