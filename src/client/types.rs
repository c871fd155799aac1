//! Wire types shared by the profile API client and the auth store.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Signed-in user as returned by the auth/user service.
///
/// The password never appears here: it is write-only and only travels in
/// request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Body of `POST /api/user/check-password/:id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPasswordBody<'a> {
    pub current_password: &'a str,
}

/// Body of `POST /api/user/update/:id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub new_password: &'a str,
    /// Only sent when the caller is changing the password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<&'a str>,
}

/// Successful update response.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileResponse {
    pub user: User,
}

/// Error body convention used by the services: `{ "message": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
