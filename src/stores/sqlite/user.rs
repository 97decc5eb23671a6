//! Implements a SQLite backed user store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error, PasswordHash, User, UserID,
    db::{CreateTable, MapRow},
    stores::UserStore,
};

use super::lock;

/// Handles the creation and retrieval of User objects.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Errors
    ///
    /// Returns [Error::UsernameTaken] if the username is already in use, or
    /// [Error::SqlError] if some other SQL related error occurred.
    fn create(&mut self, username: &str, password_hash: PasswordHash) -> Result<User, Error> {
        let connection = lock(&self.connection)?;

        connection
            .execute(
                "INSERT INTO user (username, password) VALUES (?1, ?2)",
                (username, password_hash.as_ref()),
            )
            .map_err(|error| match error {
                // Code 2067 occurs when a UNIQUE constraint failed.
                rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                    if sql_error.extended_code == 2067 && desc.contains("username") =>
                {
                    Error::UsernameTaken
                }
                error => error.into(),
            })?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User::new(id, username.to_owned(), password_hash))
    }

    /// Get the user from the database that has the specified `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such user or [Error::SqlError]
    /// if there are SQL related errors.
    fn get(&self, id: UserID) -> Result<User, Error> {
        lock(&self.connection)?
            .prepare("SELECT id, username, password FROM user WHERE id = :id")?
            .query_row(&[(":id", &id.as_i64())], SQLiteUserStore::map_row)
            .map_err(|error| error.into())
    }

    /// Get the user from the database that has the specified `username`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such user or [Error::SqlError]
    /// if there are SQL related errors.
    fn get_by_username(&self, username: &str) -> Result<User, Error> {
        lock(&self.connection)?
            .prepare("SELECT id, username, password FROM user WHERE username = :username")?
            .query_row(&[(":username", username)], SQLiteUserStore::map_row)
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY,
                    username TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let username = row.get(offset + 1)?;
        let raw_password_hash: String = row.get(offset + 2)?;

        let id = UserID::new(raw_id);
        let password_hash = PasswordHash::new_unchecked(&raw_password_hash);

        Ok(Self::ReturnType::new(id, username, password_hash))
    }
}
