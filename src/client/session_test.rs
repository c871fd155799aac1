use super::*;

#[test]
fn cookie_session_finds_token_by_name() {
    let session = CookieSession::from_cookie_header("access_token=abc123");
    assert_eq!(session.bearer().as_deref(), Some("abc123"));
}

#[test]
fn cookie_session_ignores_cookie_order() {
    // Splitting on the first '=' would have returned "dark; access_token".
    let session = CookieSession::from_cookie_header("theme=dark; access_token=abc123; lang=en");
    assert_eq!(session.bearer().as_deref(), Some("abc123"));
}

#[test]
fn cookie_session_missing_cookie_is_none() {
    let session = CookieSession::from_cookie_header("theme=dark");
    assert!(session.bearer().is_none());
}

#[test]
fn cookie_session_empty_value_is_none() {
    let session = CookieSession::from_cookie_header("access_token=");
    assert!(session.bearer().is_none());
}

#[test]
fn cookie_session_custom_name() {
    let session = CookieSession::from_cookie_header("sid=xyz; access_token=abc").with_name("sid");
    assert_eq!(session.bearer().as_deref(), Some("xyz"));
}

#[test]
fn cookie_session_from_headers() {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_static("access_token=tok"));
    assert_eq!(CookieSession::from_headers(&headers).bearer().as_deref(), Some("tok"));
}

#[test]
fn static_token_empty_is_none() {
    assert!(StaticToken(String::new()).bearer().is_none());
    assert_eq!(StaticToken("t".into()).bearer().as_deref(), Some("t"));
}

#[test]
fn anonymous_has_no_token() {
    assert!(Anonymous.bearer().is_none());
}
