/// Session cookie wire contract
///
/// The session token travels in a single HTTP-only cookie. This module owns
/// the cookie's name and attributes so the login, logout, and gate code all
/// agree on one contract:
///
/// - `HttpOnly` always (the token is never exposed to page scripts)
/// - `SameSite=Strict`
/// - `Path=/`
/// - `Max-Age` of one week
/// - `Secure` in production

use axum::http::{header, HeaderMap};

/// Cookie name for the session token
pub const SESSION_COOKIE_NAME: &str = "pinkdash_session";

/// Session cookie lifetime in seconds (one week)
pub const SESSION_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// Extracts the session token from a request's `Cookie` header
///
/// Returns `None` when the header or the session cookie is absent. The
/// returned value is the raw token string; verification is the token
/// codec's job.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                cookie
                    .trim()
                    .strip_prefix(SESSION_COOKIE_NAME)
                    .and_then(|rest| rest.strip_prefix('='))
                    .map(|token| token.to_string())
            })
        })
}

/// Builds the `Set-Cookie` value that installs a session token
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Strict",
        SESSION_COOKIE_NAME, token, SESSION_MAX_AGE_SECS
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the `Set-Cookie` value that clears the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Strict",
        SESSION_COOKIE_NAME
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_from_single_cookie() {
        let headers = headers_with_cookie("pinkdash_session=abc.def.ghi");
        assert_eq!(extract_session_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_extract_from_multiple_cookies() {
        let headers =
            headers_with_cookie("theme=dark; pinkdash_session=abc.def.ghi; locale=en-US");
        assert_eq!(extract_session_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_extract_absent_cookie() {
        let headers = headers_with_cookie("theme=dark; locale=en-US");
        assert_eq!(extract_session_token(&headers), None);

        assert_eq!(extract_session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_ignores_prefix_collisions() {
        // A cookie whose name merely starts with ours must not match.
        let headers = headers_with_cookie("pinkdash_session_old=stale; pinkdash_session=fresh");
        assert_eq!(extract_session_token(&headers), Some("fresh".to_string()));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", false);
        assert!(cookie.starts_with("pinkdash_session=tok"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(!cookie.contains("Secure"));

        assert!(session_cookie("tok", true).contains("Secure"));
    }

    #[test]
    fn test_clear_session_cookie() {
        let cookie = clear_session_cookie(true);
        assert!(cookie.starts_with("pinkdash_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Secure"));
    }
}
