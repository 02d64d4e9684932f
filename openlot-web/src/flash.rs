//! One-shot notice messages
//!
//! A notice set before a redirect is shown exactly once on the next
//! rendered page. The message rides in a signed cookie so it survives the
//! redirect without server-side session storage and cannot be forged.
//!
//! Handlers that redirect call [`set_notice`] and return the jar with the
//! response; handlers that render call [`take_notice`], which reads the
//! message and removes the cookie in the same response.

use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

/// Name of the one-shot notice cookie
pub const NOTICE_COOKIE: &str = "notice";

/// Builds the notice cookie for a message
pub fn notice_cookie(message: impl Into<String>) -> Cookie<'static> {
    Cookie::build((NOTICE_COOKIE, message.into()))
        .path("/")
        .http_only(true)
        .build()
}

/// Attaches a one-shot notice to the jar
pub fn set_notice(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    jar.add(notice_cookie(message))
}

/// Takes the pending notice, if any, removing it from the jar
///
/// The returned jar must be included in the response for the removal to
/// reach the browser.
pub fn take_notice(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    match jar.get(NOTICE_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_string();
            let jar = jar.remove(Cookie::build(NOTICE_COOKIE).path("/").build());
            (jar, Some(message))
        }
        None => (jar, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    fn test_key() -> Key {
        Key::from(
            b"an-insecure-but-long-enough-test-key-used-only-in-unit-tests!!!!\
              with-some-extra-bytes-for-good-measure",
        )
    }

    #[test]
    fn test_set_then_take_roundtrip() {
        let jar = SignedCookieJar::new(test_key());
        let jar = set_notice(jar, "Please log in.");

        let (jar, message) = take_notice(jar);
        assert_eq!(message.as_deref(), Some("Please log in."));

        // Taking again finds nothing.
        let (_jar, message) = take_notice(jar);
        assert_eq!(message, None);
    }

    #[test]
    fn test_take_without_set() {
        let jar = SignedCookieJar::new(test_key());
        let (_jar, message) = take_notice(jar);
        assert_eq!(message, None);
    }

    #[test]
    fn test_notice_cookie_attributes() {
        let cookie = notice_cookie("hello");
        assert_eq!(cookie.name(), NOTICE_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
