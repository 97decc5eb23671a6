//! Defines the user store trait.

use crate::{Error, PasswordHash, User, UserID};

/// Handles the creation and retrieval of User objects.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Returns [Error::UsernameTaken] if another user already has `username`.
    fn create(&mut self, username: &str, password_hash: PasswordHash) -> Result<User, Error>;

    /// Get a user by their ID.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by their username.
    ///
    /// Returns [Error::NotFound] if no user with the given username exists.
    fn get_by_username(&self, username: &str) -> Result<User, Error>;
}
