//! Route handlers that work on any kind of transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;

use crate::{
    Error, app_state::TransactionState, auth::CurrentUser, database_id::TransactionId,
    stores::TransactionStore,
};

use super::Transaction;

/// Handler for getting a single expense or payment.
pub async fn get_transaction<T>(
    State(state): State<TransactionState<T>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<TransactionId>, Error>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Send + Sync,
{
    state.transaction_store.get(owner, id).map(Json)
}
