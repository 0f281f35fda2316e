//! The `token` session cookie.
//!
//! The session JWT is delivered as an HttpOnly cookie (and in the login
//! response body for clients that prefer the Authorization header). Logout
//! overwrites the cookie with an immediately-expiring empty value.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Format the `Set-Cookie` value carrying a fresh session token.
pub fn build_session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax")
}

/// Format the `Set-Cookie` value that clears the session cookie.
pub fn build_expired_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Extract the session token from the request `Cookie` header, if present.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_cookie_is_http_only_with_max_age() {
        let cookie = build_session_cookie("abc.def.ghi", 86400);
        assert_eq!(
            cookie,
            "token=abc.def.ghi; Path=/; Max-Age=86400; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn expired_cookie_clears_the_value() {
        let cookie = build_expired_cookie();
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; token=abc.def.ghi; lang=en"),
        );
        assert_eq!(
            session_token_from_headers(&headers).as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn missing_or_empty_token_yields_none() {
        let headers = HeaderMap::new();
        assert!(session_token_from_headers(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("token=; theme=dark"));
        assert!(session_token_from_headers(&headers).is_none());
    }
}
