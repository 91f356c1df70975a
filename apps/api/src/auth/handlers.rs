use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{login_cookie, logout_cookie, user_from_headers, validate_username};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// POST /signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Form(form): Form<Credentials>,
) -> Result<Response, AppError> {
    let username = form.username.trim();
    validate_username(username)?;
    if form.password.is_empty() {
        return Err(AppError::Validation("password cannot be empty".to_string()));
    }

    let hash = hash_password(&form.password)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))?;
    state.store.create_user(username, &hash).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Signup successful! Please login." })),
    )
        .into_response())
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    Form(form): Form<Credentials>,
) -> Result<Response, AppError> {
    let username = form.username.trim();
    let user = state
        .store
        .find_user(username)
        .await?
        .filter(|u| verify_password(&form.password, &u.password_hash))
        .ok_or(AppError::InvalidCredentials)?;

    info!("User {} logged in", user.username);

    Ok((
        [(header::SET_COOKIE, login_cookie(&user.username)?)],
        Json(json!({ "message": "Login successful.", "username": user.username })),
    )
        .into_response())
}

/// GET /logout
///
/// Clears the identity cookie and drops any interview in progress.
pub async fn handle_logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(user) = user_from_headers(&headers) {
        state.interviews.end(&user);
        info!("User {user} logged out");
    }
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, logout_cookie())],
    )
        .into_response()
}
