//! Contains the SQLite implementations of the stores, plus a convenience type
//! alias and function for an [AppState] that uses them.

mod aggregate;
mod transaction;
mod user;

pub use aggregate::SQLiteAggregateStore;
pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{AppState, Error, auth::JwtKeys, db::initialize};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteTransactionStore, SQLiteAggregateStore, SQLiteUserStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the tables could not be created.
pub fn create_app_state(db_connection: Connection, secret: &str) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        JwtKeys::new(secret.as_bytes()),
        SQLiteTransactionStore::new(connection.clone()),
        SQLiteAggregateStore::new(connection.clone()),
        SQLiteUserStore::new(connection),
    ))
}

/// Acquire the database lock.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned.
fn lock(connection: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}
