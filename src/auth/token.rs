//! Issuing and verifying the JSON Web Tokens that authenticate API requests.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, User, UserID};

/// How long a token is valid for unless configured otherwise.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::days(30);

/// The contents of a JSON Web Token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the user the token was issued to.
    pub sub: String,
    /// The name of the user the token was issued to.
    pub username: String,
    /// When the token was issued, in seconds since the Unix epoch.
    pub iat: i64,
    /// When the token expires, in seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    /// Create the claims for a token issued to `user` at `now`.
    pub fn new(user: &User, now: OffsetDateTime, duration: Duration) -> Self {
        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.unix_timestamp(),
            exp: (now + duration).unix_timestamp(),
        }
    }

    /// The ID of the user the token was issued to.
    ///
    /// # Errors
    /// Returns [Error::Unauthenticated] if the subject is not a user ID.
    pub fn user_id(&self) -> Result<UserID, Error> {
        self.sub
            .parse()
            .map(UserID::new)
            .map_err(|_| Error::Unauthenticated)
    }
}

/// The keys used to sign and verify tokens, derived from the server secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Create HS256 keys from `secret`.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Sign `claims` into a token.
    ///
    /// # Errors
    /// Returns [Error::TokenCreation] if the token could not be encoded.
    pub fn encode(&self, claims: &Claims) -> Result<String, Error> {
        encode(&Header::default(), claims, &self.encoding).map_err(|error| {
            tracing::error!("Could not create token: {error}");
            Error::TokenCreation
        })
    }

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    /// Returns [Error::Unauthenticated] if the signature is invalid or the
    /// token has expired.
    pub fn decode(&self, token: &str) -> Result<Claims, Error> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|error| {
                tracing::debug!("Rejected token: {error}");
                Error::Unauthenticated
            })
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtKeys(********)")
    }
}
