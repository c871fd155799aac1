//! REST client for the auth and user services consumed by the profile page.
//!
//! ERROR HANDLING
//! ==============
//! Non-OK responses become `ApiError::Rejected` carrying the server's
//! `{message}` when the body parses as one, and `None` otherwise; a non-JSON
//! error body is never itself an error. Send/connect failures and malformed
//! success bodies are `ApiError::Transport`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};

use super::session::{ACCESS_TOKEN_COOKIE, SessionToken};
use super::types::{CheckPasswordBody, ErrorBody, UpdateProfileBody, UpdateProfileResponse, User};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected request with status {status}")]
    Rejected { status: StatusCode, message: Option<String> },
}

impl ApiError {
    /// Server-supplied message, if the error body carried one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Transport(_) => None,
        }
    }
}

/// Where the API lives. Paths are appended to `base_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_owned() }
    }
}

/// Client for the four profile endpoints.
#[derive(Clone)]
pub struct ProfileApi {
    http: reqwest::Client,
    config: ApiConfig,
    token: Arc<dyn SessionToken>,
}

impl ProfileApi {
    #[must_use]
    pub fn new(config: ApiConfig, token: Arc<dyn SessionToken>) -> Self {
        Self::with_client(reqwest::Client::new(), config, token)
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client, config: ApiConfig, token: Arc<dyn SessionToken>) -> Self {
        Self { http, config, token }
    }

    /// Every call is a JSON call, body or not.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.config.base_url))
            .header(CONTENT_TYPE, "application/json")
    }

    fn bearer(&self, req: RequestBuilder) -> RequestBuilder {
        match self.token.bearer() {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
            None => req,
        }
    }

    /// `GET /api/auth/logout`: authenticated by the session cookie.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` on a non-OK status, `Transport` if the request fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let mut req = self.request(Method::GET, "/api/auth/logout");
        if let Some(token) = self.token.bearer() {
            req = req.header(COOKIE, format!("{ACCESS_TOKEN_COOKIE}={token}"));
        }
        send(req).await?;
        Ok(())
    }

    /// `DELETE /api/user/delete/:id`.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` on a non-OK status, `Transport` if the request fails.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        let req = self.bearer(self.request(Method::DELETE, &format!("/api/user/delete/{user_id}")));
        send(req).await?;
        Ok(())
    }

    /// `POST /api/user/check-password/:id`: verify the current password.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the password is wrong or the caller is not
    /// authorized, `Transport` if the request fails.
    pub async fn check_password(&self, user_id: &str, current_password: &str) -> Result<(), ApiError> {
        let req = self
            .bearer(self.request(Method::POST, &format!("/api/user/check-password/{user_id}")))
            .json(&CheckPasswordBody { current_password });
        send(req).await?;
        Ok(())
    }

    /// `POST /api/user/update/:id`: returns the updated user record.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` on a non-OK status, `Transport` if the request fails
    /// or the success body has no `user`.
    pub async fn update_profile(&self, user_id: &str, body: &UpdateProfileBody<'_>) -> Result<User, ApiError> {
        let req = self
            .bearer(self.request(Method::POST, &format!("/api/user/update/{user_id}")))
            .json(body);
        let resp = send(req).await?;
        let data: UpdateProfileResponse = resp.json().await?;
        Ok(data.user)
    }
}

async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
    let resp = req.send().await?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = match resp.bytes().await {
        Ok(bytes) => rejection_message(&bytes),
        Err(_) => None,
    };
    Err(ApiError::Rejected { status, message })
}

/// Pull `message` out of an error body; anything unparseable yields `None`.
pub(crate) fn rejection_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}
