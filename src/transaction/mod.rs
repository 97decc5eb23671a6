//! Transaction management: the [Transaction] model, the builder and patch
//! that validate user input, and the route handlers for expenses and
//! payments.

mod core;
mod expense_endpoints;
mod payment_endpoints;
mod requests;
mod transaction_endpoints;

pub use core::{Transaction, TransactionBuilder, TransactionKind, TransactionPatch};
pub use expense_endpoints::{create_expense, delete_expense, list_expenses, update_expense};
pub use payment_endpoints::{create_payment, list_payments, update_payment};
pub use transaction_endpoints::get_transaction;
