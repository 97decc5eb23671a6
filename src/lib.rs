//! Checkout is a REST API for tracking personal expenses and payments.
//!
//! Users sign up and log in to get a bearer token, record expenses and
//! payments, and query them back as filtered lists or as statistics: daily,
//! monthly and yearly expense summaries, per tag summaries, their balance and
//! how much of their income they spend.
//!
//! Every transaction belongs to exactly one user and no request can see or
//! change another user's transactions.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod auth;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod password;
mod routing;
mod statistics;
mod tag;
mod timestamp;
mod transaction;
mod user;

pub mod stores;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{Claims, Credentials, JwtKeys, TokenResponse};
pub use database_id::{DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use statistics::{
    CumulativeBalance, DailyExpenseSummary, ExpenseSummary, IncomeSpent, MonthlyCashFlow,
    MonthlyExpenseSummary, TagStatistic, YearMonth, YearlyExpenseSummary, balance,
    cumulative_balance_per_month, daily_statistics_for_month, days_in_month,
    income_spent_percentage, monthly_statistics_for_year, monthly_statistics_for_years,
    sum_of_expenses_for_month, tag_statistics,
};
pub use tag::Tags;
pub use transaction::{Transaction, TransactionBuilder, TransactionKind, TransactionPatch};
pub use user::{User, UserID};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A field in the request failed validation, e.g. a blank name or a
    /// price out of range.
    #[error("{0}")]
    Validation(String),

    /// A month outside 1 to 12 was requested.
    #[error("invalid month {0}, expected a value from 1 to 12")]
    InvalidMonth(u8),

    /// A year outside 1 to 9999 was requested.
    #[error("invalid year {0}, expected a value from 1 to 9999")]
    InvalidYear(i32),

    /// An update request did not contain any fields to change.
    #[error("no fields to update")]
    NoFieldsToUpdate,

    /// The request body, path or query string could not be parsed.
    #[error("invalid request: {0}")]
    InvalidBody(String),

    /// A date could not be parsed as an RFC3339 timestamp or a `YYYY-MM-DD` date.
    #[error("invalid date \"{0}\", expected an RFC3339 timestamp or YYYY-MM-DD")]
    InvalidDate(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The username is already registered.
    #[error("the username is already taken")]
    UsernameTaken,

    /// The request did not carry a valid bearer token.
    #[error("missing or invalid bearer token")]
    Unauthenticated,

    /// The username or password is wrong. Which one is not revealed.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An auth token could not be created.
    #[error("could not create the auth token")]
    TokenCreation,

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::InvalidMonth(_)
            | Error::InvalidYear(_)
            | Error::NoFieldsToUpdate
            | Error::InvalidBody(_)
            | Error::InvalidDate(_)
            | Error::TooWeak(_)
            | Error::UsernameTaken => StatusCode::BAD_REQUEST,
            Error::Unauthenticated | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::HashingError(_)
            | Error::TokenCreation
            | Error::JSONSerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidBody(rejection.body_text())
    }
}

impl From<axum_extra::extract::QueryRejection> for Error {
    fn from(rejection: axum_extra::extract::QueryRejection) -> Self {
        Error::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            // Internal details are only for the server logs.
            tracing::error!("An unexpected error occurred: {}", self);
            "an internal server error occurred, check the server logs for more details"
                .to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
