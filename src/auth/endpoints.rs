//! Route handlers for signing up and logging in.

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error, PasswordHash, User, ValidatedPassword, app_state::UserState, stores::UserStore,
};

use super::Claims;

/// The username and password sent to sign up or log in.
#[derive(Deserialize)]
pub struct Credentials {
    /// The name the user logs in with.
    pub username: String,
    /// The raw password.
    pub password: String,
}

/// The body returned after a successful sign up or log in.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// A bearer token for authenticating later requests.
    pub token: String,
}

fn issue_token<U>(user: &User, state: &UserState<U>) -> Result<Json<TokenResponse>, Error>
where
    U: UserStore + Send + Sync,
{
    let claims = Claims::new(user, OffsetDateTime::now_utc(), state.token_duration);

    state
        .jwt_keys
        .encode(&claims)
        .map(|token| Json(TokenResponse { token }))
}

/// Handler for sign up requests.
///
/// # Errors
///
/// This function will return an error if:
/// - the username is blank,
/// - the password is too weak,
/// - the username is already taken,
/// - or an internal error occurred while hashing the password or creating the token.
pub async fn sign_up<U>(
    State(mut state): State<UserState<U>>,
    WithRejection(Json(credentials), _): WithRejection<Json<Credentials>, Error>,
) -> Result<(StatusCode, Json<TokenResponse>), Error>
where
    U: UserStore + Send + Sync,
{
    let username = credentials.username.trim();

    if username.is_empty() {
        return Err(Error::Validation("username cannot be empty".to_owned()));
    }

    let password = ValidatedPassword::new(&credentials.password, &[username])?;
    let password_hash = PasswordHash::new(password, state.password_hash_cost)?;
    let user = state.user_store.create(username, password_hash)?;

    tracing::info!("Registered user {} ({})", user.username, user.id);

    issue_token(&user, &state).map(|token| (StatusCode::CREATED, token))
}

/// Handler for log in requests.
///
/// # Errors
///
/// This function will return an error if:
/// - the username does not belong to a registered user,
/// - the password is not correct,
/// - or an internal error occurred while verifying the password or creating the token.
pub async fn log_in<U>(
    State(state): State<UserState<U>>,
    WithRejection(Json(credentials), _): WithRejection<Json<Credentials>, Error>,
) -> Result<Json<TokenResponse>, Error>
where
    U: UserStore + Send + Sync,
{
    let user = state
        .user_store
        .get_by_username(credentials.username.trim())
        .map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?;

    let is_password_correct = user
        .password_hash
        .verify(&credentials.password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !is_password_correct {
        return Err(Error::InvalidCredentials);
    }

    issue_token(&user, &state)
}
