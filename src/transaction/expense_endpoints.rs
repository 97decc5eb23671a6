//! Route handlers for creating, updating, deleting and listing expenses.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::{Query, WithRejection};

use crate::{
    Error, app_state::TransactionState, auth::CurrentUser, database_id::TransactionId,
    stores::TransactionStore,
};

use super::{
    Transaction, TransactionKind,
    requests::{ExpenseListQuery, NewTransaction, TransactionUpdate},
};

/// Handler for creating an expense. The price is stored as a negative amount.
pub async fn create_expense<T>(
    State(mut state): State<TransactionState<T>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Json(body), _): WithRejection<Json<NewTransaction>, Error>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    T: TransactionStore + Send + Sync,
{
    let builder = body.into_builder(TransactionKind::Expense, owner)?;
    let expense = state.transaction_store.create(builder)?;

    tracing::debug!("Created expense {} for user {owner}", expense.id);

    Ok((StatusCode::CREATED, Json(expense)))
}

/// Handler for partially updating an expense.
///
/// A new price must be greater than zero and replaces the stored amount
/// with its negation.
pub async fn update_expense<T>(
    State(mut state): State<TransactionState<T>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<TransactionId>, Error>,
    WithRejection(Json(body), _): WithRejection<Json<TransactionUpdate>, Error>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let patch = body.into_patch(TransactionKind::Expense)?;

    state
        .transaction_store
        .update(owner, id, patch)
        .map(Json)
}

/// Handler for deleting an expense. Responds with the deleted expense.
pub async fn delete_expense<T>(
    State(mut state): State<TransactionState<T>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<TransactionId>, Error>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let expense = state.transaction_store.delete(owner, id)?;

    tracing::debug!("Deleted expense {id} for user {owner}");

    Ok(Json(expense))
}

/// Handler for listing expenses, newest first.
pub async fn list_expenses<T>(
    State(state): State<TransactionState<T>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Query(query), _): WithRejection<Query<ExpenseListQuery>, Error>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let query = query.into_query()?;

    state.transaction_store.get_query(owner, &query).map(Json)
}
