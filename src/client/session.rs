//! Bearer token accessors.
//!
//! Requests to the user service authenticate with `Authorization: Bearer`.
//! Where the token comes from is the accessor's business: a fixed value, or a
//! named cookie looked up in a `Cookie` header.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use axum::http::header::{COOKIE, HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Cookie the auth service sets on sign-in.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Source of the bearer token for authenticated requests.
pub trait SessionToken: Send + Sync {
    /// Current token, or `None` when the session has none.
    fn bearer(&self) -> Option<String>;
}

/// A token known up front.
#[derive(Clone, Debug)]
pub struct StaticToken(pub String);

impl SessionToken for StaticToken {
    fn bearer(&self) -> Option<String> {
        if self.0.is_empty() { None } else { Some(self.0.clone()) }
    }
}

/// Token carried in a named cookie.
#[derive(Clone, Debug)]
pub struct CookieSession {
    jar: CookieJar,
    name: &'static str,
}

impl CookieSession {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self { jar: CookieJar::from_headers(headers), name: ACCESS_TOKEN_COOKIE }
    }

    /// Parse a raw `Cookie` header value such as `theme=dark; access_token=abc`.
    /// An unparseable header yields an empty session.
    #[must_use]
    pub fn from_cookie_header(raw: &str) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(raw) {
            headers.insert(COOKIE, value);
        }
        Self::from_headers(&headers)
    }

    #[must_use]
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl SessionToken for CookieSession {
    fn bearer(&self) -> Option<String> {
        self.jar
            .get(self.name)
            .map(Cookie::value)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }
}

/// No session at all; requests go out unauthenticated.
#[derive(Clone, Copy, Debug, Default)]
pub struct Anonymous;

impl SessionToken for Anonymous {
    fn bearer(&self) -> Option<String> {
        None
    }
}
