//! Bearer token authentication: signing up, logging in and the extractor
//! protected routes use to identify the user.

mod endpoints;
mod extractor;
mod token;

pub use endpoints::{Credentials, TokenResponse, log_in, sign_up};
pub use extractor::CurrentUser;
pub use token::{Claims, DEFAULT_TOKEN_DURATION, JwtKeys};
