//! Identity middleware and route guards
//!
//! The identity layer runs on every request: it reads the `jwt` cookie,
//! validates the signature, and on success inserts an [`Identity`] into the
//! request extensions. An invalid or expired cookie does not block the
//! request; the cookie is cleared on the response and the request proceeds
//! anonymously. Only the guards below turn "anonymous" into a redirect.
//!
//! # Guards
//!
//! - [`require_login`]: any authenticated account
//! - [`require_employee`]: `Employee` or `Admin` accounts
//!
//! Guards never touch the database; everything they need is in the token.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{CookieJar, SignedCookieJar};
use openlot_shared::auth::jwt::{self, Claims};
use openlot_shared::models::account::AccountType;

use crate::{app::AppState, flash};

/// Name of the identity token cookie
pub const JWT_COOKIE: &str = "jwt";

/// Per-request identity decoded from the token cookie
///
/// Handlers behind `require_login` extract this with `Extension<Identity>`;
/// public handlers that merely adapt their chrome use
/// `Option<Extension<Identity>>`.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Account ID
    pub account_id: i32,

    /// First name, for page chrome greetings
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Account role
    pub account_type: AccountType,
}

impl Identity {
    /// Whether this identity may administer inventory
    pub fn is_privileged(&self) -> bool {
        self.account_type.is_privileged()
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            account_id: claims.sub,
            first_name: claims.first_name,
            last_name: claims.last_name,
            email: claims.email,
            account_type: claims.account_type,
        }
    }
}

/// Decodes the token cookie into request identity
///
/// Applied to the whole router. Never rejects a request on its own.
pub async fn identity_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let mut clear_cookie = false;

    if let Some(cookie) = jar.get(JWT_COOKIE) {
        match jwt::validate_token(cookie.value(), &state.config.secrets.jwt_secret) {
            Ok(claims) => {
                req.extensions_mut().insert(Identity::from(claims));
            }
            Err(e) => {
                tracing::debug!("discarding invalid identity token: {}", e);
                clear_cookie = true;
            }
        }
    }

    let mut response = next.run(req).await;

    if clear_cookie {
        response.headers_mut().append(
            header::SET_COOKIE,
            HeaderValue::from_static("jwt=; Path=/; HttpOnly; Max-Age=0"),
        );
    }

    response
}

/// Guard requiring a logged-in account
///
/// Anonymous requests get a one-shot notice and a redirect to the login
/// page; no state is touched.
pub async fn require_login(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.extensions().get::<Identity>().is_some() {
        return next.run(req).await;
    }

    let jar = SignedCookieJar::new(state.cookie_key())
        .add(flash::notice_cookie("Please log in."));
    (jar, Redirect::to("/account/login")).into_response()
}

/// Guard requiring an `Employee` or `Admin` account
///
/// Under-privileged and anonymous requests are both sent to the login page
/// with a notice.
pub async fn require_employee(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req
        .extensions()
        .get::<Identity>()
        .is_some_and(Identity::is_privileged)
    {
        return next.run(req).await;
    }

    let jar = SignedCookieJar::new(state.cookie_key()).add(flash::notice_cookie(
        "You must be logged in as an employee or administrator to access that page.",
    ));
    (jar, Redirect::to("/account/login")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(account_type: AccountType) -> Identity {
        Identity {
            account_id: 1,
            first_name: "Sam".to_string(),
            last_name: "Field".to_string(),
            email: "sam@example.com".to_string(),
            account_type,
        }
    }

    #[test]
    fn test_privilege_by_role() {
        assert!(!identity(AccountType::Client).is_privileged());
        assert!(identity(AccountType::Employee).is_privileged());
        assert!(identity(AccountType::Admin).is_privileged());
    }

    #[test]
    fn test_identity_from_claims() {
        let claims = Claims {
            sub: 9,
            iss: "openlot".to_string(),
            iat: 0,
            exp: i64::MAX,
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            email: "ada@example.com".to_string(),
            account_type: AccountType::Admin,
        };

        let identity = Identity::from(claims);
        assert_eq!(identity.account_id, 9);
        assert_eq!(identity.first_name, "Ada");
        assert_eq!(identity.account_type, AccountType::Admin);
    }
}
