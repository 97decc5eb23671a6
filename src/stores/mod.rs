//! Contains traits and implementations for objects that store the application's
//! users and transactions.

mod aggregate;
mod transaction;
mod user;

pub mod sqlite;

pub use aggregate::AggregateStore;
pub use transaction::{TransactionQuery, TransactionStore};
pub use user::UserStore;
