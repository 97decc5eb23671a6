//! Balance, spending and income ratios computed from a user's transactions.

use time::{Date, macros::time};

use crate::{
    Error, UserID,
    stores::{AggregateStore, TransactionQuery, TransactionStore},
};

use super::{CumulativeBalance, IncomeSpent, MonthlyCashFlow, buckets::days_in_month};

/// The sum of all of `owner`'s transactions. Zero if there are none.
pub fn balance(store: &impl TransactionStore, owner: UserID) -> Result<f64, Error> {
    store.sum(owner, &TransactionQuery::default())
}

/// The sum of `owner`'s expenses in the calendar month containing `today`.
///
/// The result is zero or negative, following the sign of stored expenses.
pub fn sum_of_expenses_for_month(
    store: &impl TransactionStore,
    owner: UserID,
    today: Date,
) -> Result<f64, Error> {
    let first_day = today.replace_day(1).map_err(|error| {
        tracing::error!("Could not get the first day of the month for {today}: {error}");
        Error::InvalidDate(today.to_string())
    })?;
    let last_day = first_day
        .replace_day(days_in_month(today.year(), today.month().into())?)
        .map_err(|error| {
            tracing::error!("Could not get the last day of the month for {today}: {error}");
            Error::InvalidDate(today.to_string())
        })?;

    let query = TransactionQuery {
        date_from: Some(first_day.midnight().assume_utc()),
        date_to: Some(last_day.with_time(time!(23:59:59)).assume_utc()),
        ..TransactionQuery::expenses()
    };

    store.sum(owner, &query)
}

/// How much of each month's income `owner` spent, in chronological order.
///
/// Months without any transactions are skipped. The percentage is `None` for
/// months without income.
pub fn income_spent_percentage(
    store: &impl AggregateStore,
    owner: UserID,
) -> Result<Vec<IncomeSpent>, Error> {
    let cash_flow = store.monthly_cash_flow(owner)?;

    Ok(cash_flow.into_iter().map(to_income_spent).collect())
}

fn to_income_spent(cash_flow: MonthlyCashFlow) -> IncomeSpent {
    let spent_percentage = if cash_flow.income > 0.0 {
        Some(cash_flow.spent / cash_flow.income * 100.0)
    } else {
        None
    };

    IncomeSpent {
        month: cash_flow.month,
        total_income: cash_flow.income,
        total_spent: cash_flow.spent,
        spent_percentage,
    }
}

/// `owner`'s balance at the end of each month with transactions, in
/// chronological order.
pub fn cumulative_balance_per_month(
    store: &impl AggregateStore,
    owner: UserID,
) -> Result<Vec<CumulativeBalance>, Error> {
    let cash_flow = store.monthly_cash_flow(owner)?;

    Ok(running_balances(&cash_flow))
}

/// Accumulate the net amount of each month, oldest first.
fn running_balances(cash_flow: &[MonthlyCashFlow]) -> Vec<CumulativeBalance> {
    let mut balances = Vec::with_capacity(cash_flow.len());
    let mut cumulative = 0.0;

    for month in cash_flow {
        cumulative += month.income - month.spent;
        balances.push(CumulativeBalance {
            year_month: month.month,
            cumulative_balance: cumulative,
        });
    }

    balances
}
