//! Implements a struct that holds the state of the REST server, and the
//! smaller states that individual route handlers extract from it.

use axum::extract::FromRef;
use time::Duration;

use crate::{
    PasswordHash,
    auth::{DEFAULT_TOKEN_DURATION, JwtKeys},
    stores::{AggregateStore, TransactionStore, UserStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T, A, U>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
    U: UserStore + Send + Sync,
{
    /// The keys for signing and verifying auth tokens.
    pub jwt_keys: JwtKeys,
    /// How long newly issued auth tokens are valid for.
    pub token_duration: Duration,
    /// The bcrypt cost used when hashing new passwords.
    pub password_hash_cost: u32,
    /// The store for managing user [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
    /// The store for grouped queries over transactions.
    pub aggregate_store: A,
    /// The store for managing [users](crate::User).
    pub user_store: U,
}

impl<T, A, U> AppState<T, A, U>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
    U: UserStore + Send + Sync,
{
    /// Create a new [AppState] with the default token duration and hashing cost.
    pub fn new(jwt_keys: JwtKeys, transaction_store: T, aggregate_store: A, user_store: U) -> Self {
        Self {
            jwt_keys,
            token_duration: DEFAULT_TOKEN_DURATION,
            password_hash_cost: PasswordHash::DEFAULT_COST,
            transaction_store,
            aggregate_store,
            user_store,
        }
    }

    /// Set how long newly issued auth tokens are valid for.
    pub fn with_token_duration(mut self, token_duration: Duration) -> Self {
        self.token_duration = token_duration;
        self
    }

    /// Set the bcrypt cost used when hashing new passwords.
    pub fn with_password_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = cost;
        self
    }
}

/// The state needed to verify auth tokens.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The keys for signing and verifying auth tokens.
    pub jwt_keys: JwtKeys,
}

impl<T, A, U> FromRef<AppState<T, A, U>> for AuthState
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
    U: UserStore + Send + Sync,
{
    fn from_ref(state: &AppState<T, A, U>) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
        }
    }
}

/// The state needed to sign up and log in users.
#[derive(Debug, Clone)]
pub struct UserState<U>
where
    U: UserStore + Send + Sync,
{
    /// The keys for signing auth tokens.
    pub jwt_keys: JwtKeys,
    /// How long newly issued auth tokens are valid for.
    pub token_duration: Duration,
    /// The bcrypt cost used when hashing new passwords.
    pub password_hash_cost: u32,
    /// The store for managing [users](crate::User).
    pub user_store: U,
}

impl<T, A, U> FromRef<AppState<T, A, U>> for UserState<U>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<T, A, U>) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
            token_duration: state.token_duration,
            password_hash_cost: state.password_hash_cost,
            user_store: state.user_store.clone(),
        }
    }
}

/// The state needed to create, read, update and delete transactions.
#[derive(Debug, Clone)]
pub struct TransactionState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for managing user [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<T, A, U> FromRef<AppState<T, A, U>> for TransactionState<T>
where
    T: TransactionStore + Clone + Send + Sync,
    A: AggregateStore + Send + Sync,
    U: UserStore + Send + Sync,
{
    fn from_ref(state: &AppState<T, A, U>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The state needed to compute statistics.
#[derive(Debug, Clone)]
pub struct StatisticsState<T, A>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
{
    /// The store for managing user [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
    /// The store for grouped queries over transactions.
    pub aggregate_store: A,
}

impl<T, A, U> FromRef<AppState<T, A, U>> for StatisticsState<T, A>
where
    T: TransactionStore + Clone + Send + Sync,
    A: AggregateStore + Clone + Send + Sync,
    U: UserStore + Send + Sync,
{
    fn from_ref(state: &AppState<T, A, U>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            aggregate_store: state.aggregate_store.clone(),
        }
    }
}
