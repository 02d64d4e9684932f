//! Account controllers: registration, login, profile management
//!
//! # Endpoints
//!
//! - `GET  /account/login`, `GET /account/register` - render forms (public)
//! - `POST /account/register` - create account
//! - `POST /account/login` - authenticate, set the token cookie
//! - `GET  /account/` - account management (login required)
//! - `GET  /account/update/:account_id` - update form (login required)
//! - `POST /account/update` - update profile (login required)
//! - `POST /account/change-password` - change password (login required)
//! - `GET  /account/logout` - clear the token cookie

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use validator::Validate;

use openlot_shared::auth::{jwt, password};
use openlot_shared::models::account::Account;

use crate::{
    app::AppState,
    error::AppResult,
    flash,
    middleware::identity::{Identity, JWT_COOKIE},
    routes::site_nav,
    validation::{collect_errors, FieldError},
    views::{
        self,
        account::{LoginFormValues, RegisterFormValues, UpdateFormValues},
        layout,
    },
};

/// Registration form payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "First name is required."))]
    pub account_firstname: String,

    #[validate(length(min = 1, message = "Last name is required."))]
    pub account_lastname: String,

    #[validate(email(message = "A valid email is required."))]
    pub account_email: String,

    /// Strength is validated separately; never echoed back
    pub account_password: String,
}

/// Login form payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "A valid email is required."))]
    pub account_email: String,

    #[validate(length(min = 1, message = "Password is required."))]
    pub account_password: String,
}

/// Account update form payload
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountForm {
    pub account_id: String,

    #[validate(length(min = 1, message = "First name is required."))]
    pub account_firstname: String,

    #[validate(length(min = 1, message = "Last name is required."))]
    pub account_lastname: String,

    #[validate(email(message = "A valid email is required."))]
    pub account_email: String,
}

/// Password change form payload
#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    pub account_id: String,
    pub account_password: String,
}

impl RegisterForm {
    fn values(&self) -> RegisterFormValues {
        RegisterFormValues {
            account_firstname: self.account_firstname.trim().to_string(),
            account_lastname: self.account_lastname.trim().to_string(),
            account_email: self.account_email.trim().to_string(),
        }
    }
}

/// GET /account/login
pub async fn build_login(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);
    let identity = identity.as_ref().map(|Extension(identity)| identity);

    let content = views::account::login_form(&LoginFormValues::default(), &[]);
    let page = layout::page("Login", identity, nav, notice.as_deref(), content);
    Ok((jar, page).into_response())
}

/// GET /account/register
pub async fn build_register(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);
    let identity = identity.as_ref().map(|Extension(identity)| identity);

    let content = views::account::register_form(&RegisterFormValues::default(), &[]);
    let page = layout::page("Register", identity, nav, notice.as_deref(), content);
    Ok((jar, page).into_response())
}

/// POST /account/register
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let values = form.values();

    let mut errors = collect_errors(form.validate());
    if let Err(message) = password::validate_password_strength(&form.account_password) {
        errors.push(FieldError::new("account_password", message));
    }
    // Only bother the database once the email at least parses.
    if !errors.iter().any(|e| e.field == "account_email")
        && Account::email_exists(&state.db, values.account_email.as_str(), None).await?
    {
        errors.push(FieldError::new(
            "account_email",
            "That email is already registered. Please log in or use a different email.",
        ));
    }

    if !errors.is_empty() {
        let content = views::account::register_form(&values, &errors);
        let page = layout::page("Register", None, nav, None, content);
        return Ok((jar, page).into_response());
    }

    let password_hash = match password::hash_password(&form.account_password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("registration hash failed: {}", e);
            let content = views::account::register_form(&values, &[]);
            let page = layout::page(
                "Register",
                None,
                nav,
                Some("Sorry, there was an error processing the registration."),
                content,
            );
            return Ok((jar, (StatusCode::INTERNAL_SERVER_ERROR, page)).into_response());
        }
    };

    match Account::create(
        &state.db,
        &values.account_firstname,
        &values.account_lastname,
        &values.account_email,
        &password_hash,
    )
    .await
    {
        Ok(account) => {
            let notice = format!(
                "Congratulations, you're registered {}. Please log in.",
                account.account_firstname
            );
            let content = views::account::login_form(&LoginFormValues::default(), &[]);
            let page = layout::page("Login", None, nav, Some(&notice), content);
            Ok((jar, (StatusCode::CREATED, page)).into_response())
        }
        Err(e) => {
            tracing::error!("registration insert failed: {}", e);
            let content = views::account::register_form(&values, &[]);
            let page = layout::page(
                "Register",
                None,
                nav,
                Some("Sorry, the registration failed. Please try again."),
                content,
            );
            Ok((jar, (StatusCode::INTERNAL_SERVER_ERROR, page)).into_response())
        }
    }
}

/// POST /account/login
///
/// Unknown email, wrong password, and a failed hash comparison all take the
/// same recoverable path: a generic notice, a 400, and the login form with
/// the email preserved. Comparison failures are additionally logged.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    cookies: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let values = LoginFormValues {
        account_email: form.account_email.trim().to_string(),
    };

    let errors = collect_errors(form.validate());
    if !errors.is_empty() {
        let content = views::account::login_form(&values, &errors);
        let page = layout::page("Login", None, nav, None, content);
        return Ok((jar, page).into_response());
    }

    let check_credentials = |jar: SignedCookieJar, nav| {
        let content = views::account::login_form(&values, &[]);
        let page = layout::page(
            "Login",
            None,
            nav,
            Some("Please check your credentials and try again."),
            content,
        );
        (jar, (StatusCode::BAD_REQUEST, page)).into_response()
    };

    let Some(account) = Account::find_by_email(&state.db, &values.account_email).await? else {
        return Ok(check_credentials(jar, nav));
    };

    match password::verify_password(&form.account_password, &account.account_password) {
        Ok(true) => {
            let token = jwt::create_token(
                &jwt::Claims::for_account(&account),
                &state.config.secrets.jwt_secret,
            )?;
            let cookies = cookies.add(session_cookie(token, state.config.production));
            Ok((cookies, Redirect::to("/account/")).into_response())
        }
        Ok(false) => Ok(check_credentials(jar, nav)),
        Err(e) => {
            tracing::error!("password comparison failed during login: {}", e);
            Ok(check_credentials(jar, nav))
        }
    }
}

/// GET /account/ - account management page
pub async fn management(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);

    let content = views::account::management(&identity);
    let page = layout::page(
        "Account Management",
        Some(&identity),
        nav,
        notice.as_deref(),
        content,
    );
    Ok((jar, page).into_response())
}

/// GET /account/update/:account_id - update form prefilled from the database
pub async fn build_update(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(account_id): Path<i32>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);

    let values = update_values_for(&state, account_id).await?;
    let content = views::account::update_forms(&values, &[]);
    let page = layout::page(
        "Update Account",
        Some(&identity),
        nav,
        notice.as_deref(),
        content,
    );
    Ok((jar, page).into_response())
}

/// POST /account/update
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
    cookies: CookieJar,
    Form(form): Form<UpdateAccountForm>,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;

    let mut errors = collect_errors(form.validate());
    let account_id = match form.account_id.trim().parse::<i32>() {
        Ok(id) => id,
        Err(_) => {
            errors.push(FieldError::new("account_id", "Invalid account."));
            identity.account_id
        }
    };

    let values = UpdateFormValues {
        account_id,
        account_firstname: form.account_firstname.trim().to_string(),
        account_lastname: form.account_lastname.trim().to_string(),
        account_email: form.account_email.trim().to_string(),
    };

    if !errors.iter().any(|e| e.field == "account_email")
        && Account::email_exists(&state.db, &values.account_email, Some(account_id)).await?
    {
        errors.push(FieldError::new(
            "account_email",
            "That email is already registered to another account.",
        ));
    }

    if !errors.is_empty() {
        let content = views::account::update_forms(&values, &errors);
        let page = layout::page("Update Account", Some(&identity), nav, None, content);
        return Ok((jar, page).into_response());
    }

    match Account::update_profile(
        &state.db,
        account_id,
        &values.account_firstname,
        &values.account_lastname,
        &values.account_email,
    )
    .await
    {
        Ok(Some(account)) => {
            // Reissue the token so the chrome reflects the new identity.
            let token = jwt::create_token(
                &jwt::Claims::for_account(&account),
                &state.config.secrets.jwt_secret,
            )?;
            let cookies = cookies.add(session_cookie(token, state.config.production));
            let jar = flash::set_notice(jar, "Account information updated successfully.");
            Ok((cookies, jar, Redirect::to("/account/")).into_response())
        }
        Ok(None) => Ok(update_failed(jar, nav, &identity, &values)),
        Err(e) => {
            tracing::error!("account update failed: {}", e);
            Ok(update_failed(jar, nav, &identity, &values))
        }
    }
}

/// POST /account/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
    Form(form): Form<ChangePasswordForm>,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;

    let account_id = form
        .account_id
        .trim()
        .parse::<i32>()
        .unwrap_or(identity.account_id);

    if let Err(message) = password::validate_password_strength(&form.account_password) {
        let values = update_values_for(&state, account_id).await?;
        let errors = vec![FieldError::new("account_password", message)];
        let content = views::account::update_forms(&values, &errors);
        let page = layout::page("Update Account", Some(&identity), nav, None, content);
        return Ok((jar, page).into_response());
    }

    let password_hash = match password::hash_password(&form.account_password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("password change hash failed: {}", e);
            let values = update_values_for(&state, account_id).await?;
            let content = views::account::update_forms(&values, &[]);
            let page = layout::page(
                "Update Account",
                Some(&identity),
                nav,
                Some("Sorry, there was an error processing the password change."),
                content,
            );
            return Ok((jar, (StatusCode::INTERNAL_SERVER_ERROR, page)).into_response());
        }
    };

    match Account::update_password(&state.db, account_id, &password_hash).await {
        Ok(true) => {
            let jar = flash::set_notice(jar, "Password changed successfully.");
            Ok((jar, Redirect::to("/account/")).into_response())
        }
        Ok(false) | Err(_) => {
            let values = update_values_for(&state, account_id).await?;
            let content = views::account::update_forms(&values, &[]);
            let page = layout::page(
                "Update Account",
                Some(&identity),
                nav,
                Some("Sorry, the password change failed. Please try again."),
                content,
            );
            Ok((jar, (StatusCode::NOT_IMPLEMENTED, page)).into_response())
        }
    }
}

/// GET /account/logout
pub async fn logout(cookies: CookieJar) -> Response {
    let cookies = cookies.remove(Cookie::build(JWT_COOKIE).path("/").build());
    (cookies, Redirect::to("/")).into_response()
}

/// Builds the token cookie, secure outside development
fn session_cookie(token: String, production: bool) -> Cookie<'static> {
    let mut builder = Cookie::build((JWT_COOKIE, token)).path("/").http_only(true);
    if production {
        builder = builder.secure(true);
    }
    builder.build()
}

/// Re-fetches the current account fields for the update view
async fn update_values_for(state: &AppState, account_id: i32) -> AppResult<UpdateFormValues> {
    let account = Account::find_by_id(&state.db, account_id)
        .await?
        .ok_or_else(|| {
            crate::error::AppError::NotFound("Sorry, we appear to have lost that page.".to_string())
        })?;

    Ok(UpdateFormValues {
        account_id: account.account_id,
        account_firstname: account.account_firstname,
        account_lastname: account.account_lastname,
        account_email: account.account_email,
    })
}

/// 501 re-render for a failed profile update, submitted values preserved
fn update_failed(
    jar: SignedCookieJar,
    nav: maud::Markup,
    identity: &Identity,
    values: &UpdateFormValues,
) -> Response {
    let content = views::account::update_forms(values, &[]);
    let page = layout::page(
        "Update Account",
        Some(identity),
        nav,
        Some("Sorry, the update failed. Please try again."),
        content,
    );
    (jar, (StatusCode::NOT_IMPLEMENTED, page)).into_response()
}
