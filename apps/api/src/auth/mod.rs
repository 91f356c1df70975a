//! Cookie identity. The `user` cookie carries the username and nothing else;
//! it is neither signed nor expiring.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};

use crate::errors::AppError;

pub mod handlers;
pub mod password;

pub const USER_COOKIE: &str = "user";

/// Username of the caller, taken from the identity cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_from_headers(&parts.headers)
            .map(CurrentUser)
            .ok_or(AppError::NotAuthenticated)
    }
}

/// Scans every `Cookie` header for a non-empty identity cookie.
pub fn user_from_headers(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{USER_COOKIE}=");
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()))
        .map(|value| value.trim_matches('"').to_string())
        .find(|value| !value.is_empty())
}

/// Usernames end up verbatim in a cookie, so keep them to a safe alphabet.
pub fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(AppError::Validation(
            "username must be 3 to 32 characters".to_string(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(AppError::Validation(
            "username may only contain letters, digits, '_', '-' and '.'".to_string(),
        ));
    }
    Ok(())
}

pub fn login_cookie(username: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&format!(
        "{USER_COOKIE}={username}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .map_err(|e| AppError::Internal(e.into()))
}

pub fn logout_cookie() -> HeaderValue {
    HeaderValue::from_static("user=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}
