//! The extractor that authenticates requests with a bearer token.

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{Error, UserID, app_state::AuthState};

/// The user a request was made by.
///
/// Extracting this from a request verifies the `Authorization: Bearer <token>`
/// header, so a handler that takes a [CurrentUser] is only reachable with a
/// valid token. Requests without one are rejected with [Error::Unauthenticated].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserID);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::Unauthenticated)?;

        let auth_state = AuthState::from_ref(state);
        let claims = auth_state.jwt_keys.decode(bearer.token())?;

        claims.user_id().map(CurrentUser)
    }
}
