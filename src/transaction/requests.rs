//! The request bodies and query strings accepted by the transaction endpoints.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    Error, UserID,
    stores::TransactionQuery,
    tag::Tags,
    timestamp::{deserialize_optional_request_date, parse_request_date},
};

use super::{TransactionBuilder, TransactionKind, TransactionPatch};

/// The body for creating an expense or a payment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    name: String,
    #[serde(alias = "value")]
    price: f64,
    #[serde(default)]
    seller_name: Option<String>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_request_date")]
    date: Option<OffsetDateTime>,
    #[serde(default)]
    tags: Tags,
}

impl NewTransaction {
    /// Validate the body as a transaction of `kind` owned by `owner`.
    ///
    /// A missing date defaults to the current time.
    pub fn into_builder(
        self,
        kind: TransactionKind,
        owner: UserID,
    ) -> Result<TransactionBuilder, Error> {
        let builder = TransactionBuilder::new(kind, owner, &self.name, self.price)?
            .tags(self.tags)
            .seller(self.seller_name)
            .note(self.comment);

        match self.date {
            Some(date) => builder.date(date),
            None => Ok(builder),
        }
    }
}

/// The body for partially updating an expense or a payment.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionUpdate {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "value")]
    price: Option<f64>,
    #[serde(default)]
    tags: Option<Tags>,
    #[serde(default, deserialize_with = "deserialize_optional_request_date")]
    date: Option<OffsetDateTime>,
}

impl TransactionUpdate {
    /// Validate the body as a patch for a transaction of `kind`.
    pub fn into_patch(self, kind: TransactionKind) -> Result<TransactionPatch, Error> {
        TransactionPatch::new(
            kind,
            self.name.as_deref(),
            self.price,
            self.tags,
            self.date,
        )
    }
}

/// The query string for listing expenses, e.g.
/// `?limit=10&startDate=2024-01-01&tags=food&tags=rent`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    #[serde(default)]
    limit: Option<u64>,
    #[serde(default)]
    offset: Option<u64>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    name: Option<String>,
}

impl ExpenseListQuery {
    /// Convert into a store query that only matches expenses.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if either date cannot be parsed.
    pub fn into_query(self) -> Result<TransactionQuery, Error> {
        let date_from = self
            .start_date
            .as_deref()
            .map(parse_request_date)
            .transpose()?;
        let date_to = self
            .end_date
            .as_deref()
            .map(parse_request_date)
            .transpose()?;

        Ok(TransactionQuery {
            name: self.name.filter(|name| !name.trim().is_empty()),
            tags: Tags::new(self.tags).as_slice().to_vec(),
            date_from,
            date_to,
            limit: self.limit,
            offset: self.offset.unwrap_or(0),
            ..TransactionQuery::expenses()
        })
    }
}

/// The query string for listing payments.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentListQuery {
    #[serde(default)]
    limit: Option<u64>,
    #[serde(default)]
    offset: Option<u64>,
}

impl PaymentListQuery {
    /// Convert into a store query that only matches payments.
    pub fn into_query(self) -> TransactionQuery {
        TransactionQuery {
            limit: self.limit,
            offset: self.offset.unwrap_or(0),
            ..TransactionQuery::payments()
        }
    }
}
