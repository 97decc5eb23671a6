//! Defines the core data models for transactions: the stored record, the
//! builder that validates new records and the patch used for partial updates.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId, tag::Tags, timestamp::normalise, user::UserID};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or a payment, i.e. an event where money was either spent or earned.
///
/// Expenses are stored with a negative (or zero) `amount` and payments with a
/// positive `amount`, so summing the amounts of a user's transactions gives
/// their balance.
///
/// To create a new `Transaction`, use [TransactionBuilder].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user the transaction belongs to.
    #[serde(rename = "userId")]
    pub owner: UserID,
    /// What the money was spent on or earned from.
    pub name: String,
    /// The signed amount of money, negative for expenses.
    #[serde(rename = "price")]
    pub amount: f64,
    /// When the transaction happened, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// The labels attached to the transaction.
    pub tags: Tags,
    /// Who the money was paid to or received from.
    #[serde(rename = "sellerName")]
    pub seller: Option<String>,
    /// A free text note.
    #[serde(rename = "comment")]
    pub note: Option<String>,
}

impl Transaction {
    /// Whether the transaction is an expense or a payment.
    pub fn kind(&self) -> TransactionKind {
        TransactionKind::of(self.amount)
    }
}

/// The two kinds of transaction, distinguished by the sign of the stored amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Money spent, stored as an amount of zero or less.
    Expense,
    /// Money earned, stored as an amount greater than zero.
    Payment,
}

impl TransactionKind {
    /// The kind a transaction with the stored `amount` belongs to.
    pub fn of(amount: f64) -> Self {
        if amount > 0.0 {
            TransactionKind::Payment
        } else {
            TransactionKind::Expense
        }
    }

    /// Convert a user-facing `price` into the amount that is stored.
    ///
    /// # Errors
    /// Returns [Error::Validation] if:
    /// - an expense price is not a finite number greater than zero,
    /// - or a payment price is not a finite number of at least one.
    pub fn amount_from_price(self, price: f64) -> Result<f64, Error> {
        match self {
            TransactionKind::Expense if price.is_finite() && price > 0.0 => Ok(-price),
            TransactionKind::Expense => Err(Error::Validation(
                "expense price must be greater than 0".to_owned(),
            )),
            TransactionKind::Payment if price.is_finite() && price >= 1.0 => Ok(price),
            TransactionKind::Payment => Err(Error::Validation(
                "payment price cannot be less than 1".to_owned(),
            )),
        }
    }
}

fn validate_name(name: &str) -> Result<String, Error> {
    let name = name.trim();

    if name.is_empty() {
        return Err(Error::Validation("name cannot be empty".to_owned()));
    }

    Ok(name.to_owned())
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

// ============================================================================
// BUILDER
// ============================================================================

/// A validated transaction that has not been stored yet.
///
/// Use [TransactionBuilder::expense] or [TransactionBuilder::payment] to
/// create one, then the setters for the optional fields. The date defaults
/// to the time the builder was created.
///
/// ```ignore
/// let builder = TransactionBuilder::expense(owner, "Groceries", 45.99)?
///     .date(datetime!(2025-01-15 10:00 UTC))?
///     .tags(Tags::new(["food"]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The user the transaction will belong to.
    pub owner: UserID,
    /// What the money was spent on or earned from.
    pub name: String,
    /// The signed amount, already converted from the user-facing price.
    pub amount: f64,
    /// When the transaction happened, normalised to UTC.
    pub date: OffsetDateTime,
    /// The labels attached to the transaction.
    pub tags: Tags,
    /// Who the money was paid to or received from.
    pub seller: Option<String>,
    /// A free text note.
    pub note: Option<String>,
}

impl TransactionBuilder {
    /// Start building an expense of `price`, which is stored as `-price`.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `name` is blank or `price` is not a
    /// finite number greater than zero.
    pub fn expense(owner: UserID, name: &str, price: f64) -> Result<Self, Error> {
        Self::new(TransactionKind::Expense, owner, name, price)
    }

    /// Start building a payment of `price`.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `name` is blank or `price` is less than one.
    pub fn payment(owner: UserID, name: &str, price: f64) -> Result<Self, Error> {
        Self::new(TransactionKind::Payment, owner, name, price)
    }

    /// Start building a transaction of `kind` from a user-facing `price`.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `name` is blank or `price` is invalid
    /// for `kind`, see [TransactionKind::amount_from_price].
    pub fn new(
        kind: TransactionKind,
        owner: UserID,
        name: &str,
        price: f64,
    ) -> Result<Self, Error> {
        let amount = kind.amount_from_price(price)?;
        let name = validate_name(name)?;

        Ok(Self {
            owner,
            name,
            amount,
            date: normalise(OffsetDateTime::now_utc())?,
            tags: Tags::default(),
            seller: None,
            note: None,
        })
    }

    /// Set the date of the transaction.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if `date` falls outside the years 1 to
    /// 9999 once converted to UTC.
    pub fn date(mut self, date: OffsetDateTime) -> Result<Self, Error> {
        self.date = normalise(date)?;
        Ok(self)
    }

    /// Set the tags of the transaction.
    pub fn tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Set who the money was paid to or received from. Blank names are dropped.
    pub fn seller(mut self, seller: Option<String>) -> Self {
        self.seller = non_blank(seller);
        self
    }

    /// Set the note. Blank notes are dropped.
    pub fn note(mut self, note: Option<String>) -> Self {
        self.note = non_blank(note);
        self
    }
}

// ============================================================================
// PATCH
// ============================================================================

/// The fields to change on an existing transaction.
///
/// Fields that are `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    /// The new name.
    pub name: Option<String>,
    /// The new signed amount.
    pub amount: Option<f64>,
    /// The new tags, replacing the old ones.
    pub tags: Option<Tags>,
    /// The new date.
    pub date: Option<OffsetDateTime>,
}

impl TransactionPatch {
    /// Create a patch from user-facing values for a transaction of `kind`.
    ///
    /// `price` is converted with [TransactionKind::amount_from_price].
    ///
    /// # Errors
    /// Returns [Error::Validation] if `name` is blank or `price` is invalid
    /// for `kind`, or [Error::InvalidDate] if `date` cannot be normalised.
    pub fn new(
        kind: TransactionKind,
        name: Option<&str>,
        price: Option<f64>,
        tags: Option<Tags>,
        date: Option<OffsetDateTime>,
    ) -> Result<Self, Error> {
        Ok(Self {
            name: name.map(validate_name).transpose()?,
            amount: price
                .map(|price| kind.amount_from_price(price))
                .transpose()?,
            tags,
            date: date.map(normalise).transpose()?,
        })
    }

    /// Whether the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none() && self.tags.is_none() && self.date.is_none()
    }
}
