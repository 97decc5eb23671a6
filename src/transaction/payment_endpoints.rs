//! Route handlers for creating, updating and listing payments.

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
    requests::{NewTransaction, PaymentListQuery, TransactionUpdate},
};

/// Handler for creating a payment. The price may also be sent as `value`.
pub async fn create_payment<T>(
    State(mut state): State<TransactionState<T>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Json(body), _): WithRejection<Json<NewTransaction>, Error>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    T: TransactionStore + Send + Sync,
{
    let builder = body.into_builder(TransactionKind::Payment, owner)?;
    let payment = state.transaction_store.create(builder)?;

    tracing::debug!("Created payment {} for user {owner}", payment.id);

    Ok((StatusCode::CREATED, Json(payment)))
}

/// Handler for partially updating a payment.
pub async fn update_payment<T>(
    State(mut state): State<TransactionState<T>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<TransactionId>, Error>,
    WithRejection(Json(body), _): WithRejection<Json<TransactionUpdate>, Error>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let patch = body.into_patch(TransactionKind::Payment)?;

    state
        .transaction_store
        .update(owner, id, patch)
        .map(Json)
}

/// Handler for listing payments, newest first.
pub async fn list_payments<T>(
    State(state): State<TransactionState<T>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Query(query), _): WithRejection<Query<PaymentListQuery>, Error>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Send + Sync,
{
    state
        .transaction_store
        .get_query(owner, &query.into_query())
        .map(Json)
}
