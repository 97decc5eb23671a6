//! Defines the transaction store trait and the filter used to query it.

use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionBuilder, TransactionKind, TransactionPatch},
    user::UserID,
};

/// Handles the creation, retrieval, update and deletion of transactions.
///
/// Every operation is scoped to an `owner`: a transaction owned by another
/// user behaves exactly as if it did not exist.
pub trait TransactionStore {
    /// Store a new transaction.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve a single transaction.
    ///
    /// Returns [Error::NotFound] if `id` does not refer to a transaction owned by `owner`.
    fn get(&self, owner: UserID, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve the transactions matching `query`, newest first.
    fn get_query(&self, owner: UserID, query: &TransactionQuery)
    -> Result<Vec<Transaction>, Error>;

    /// Apply `patch` to a transaction and return the updated transaction.
    ///
    /// Returns [Error::NoFieldsToUpdate] if the patch is empty and
    /// [Error::NotFound] if `id` does not refer to a transaction owned by `owner`.
    fn update(
        &mut self,
        owner: UserID,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> Result<Transaction, Error>;

    /// Delete a transaction and return it as it was before deletion.
    ///
    /// Returns [Error::NotFound] if `id` does not refer to a transaction owned by `owner`.
    fn delete(&mut self, owner: UserID, id: TransactionId) -> Result<Transaction, Error>;

    /// Sum the amounts of the transactions matching `query`.
    ///
    /// `limit`, `offset` are ignored. Returns zero when nothing matches.
    fn sum(&self, owner: UserID, query: &TransactionQuery) -> Result<f64, Error>;
}

/// Defines which transactions [TransactionStore::get_query] returns.
///
/// A field left as `None` (or an empty `tags`) places no constraint on the
/// results. The remaining fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Only include transactions with one of these IDs.
    pub ids: Option<Vec<TransactionId>>,
    /// Only include transactions whose name contains this text, ignoring case.
    pub name: Option<String>,
    /// Only include transactions with a stored amount of at least this value.
    pub min_amount: Option<f64>,
    /// Only include transactions with a stored amount of at most this value.
    pub max_amount: Option<f64>,
    /// Only include expenses or only include payments.
    pub kind: Option<TransactionKind>,
    /// Only include transactions that have at least one of these tags.
    pub tags: Vec<String>,
    /// Only include transactions on or after this date.
    pub date_from: Option<OffsetDateTime>,
    /// Only include transactions on or before this date.
    pub date_to: Option<OffsetDateTime>,
    /// Return at most this many transactions.
    pub limit: Option<u64>,
    /// Skip this many transactions before returning any.
    pub offset: u64,
}

impl TransactionQuery {
    /// A query that matches every expense.
    pub fn expenses() -> Self {
        Self {
            kind: Some(TransactionKind::Expense),
            ..Default::default()
        }
    }

    /// A query that matches every payment.
    pub fn payments() -> Self {
        Self {
            kind: Some(TransactionKind::Payment),
            ..Default::default()
        }
    }

    /// Whether `transaction` satisfies the predicates of this query.
    ///
    /// Ignores `limit` and `offset`. Useful for checking results without a
    /// database, e.g. in tests.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let name = transaction.name.to_lowercase();

        self.ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&transaction.id))
            && self
                .name
                .as_ref()
                .is_none_or(|wanted| name.contains(&wanted.to_lowercase()))
            && self.min_amount.is_none_or(|min| transaction.amount >= min)
            && self.max_amount.is_none_or(|max| transaction.amount <= max)
            && self.kind.is_none_or(|kind| kind == transaction.kind())
            && (self.tags.is_empty() || transaction.tags.intersects(&self.tags))
            && self.date_from.is_none_or(|from| transaction.date >= from)
            && self.date_to.is_none_or(|to| transaction.date <= to)
    }
}
