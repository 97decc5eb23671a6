//! Expense statistics bucketed by day, month, year and tag.

use crate::{Error, UserID, stores::AggregateStore};

use super::{
    DailyExpenseSummary, ExpenseSummary, MonthlyExpenseSummary, TagStatistic,
    YearlyExpenseSummary,
    buckets::{days_in_month, fill_gaps, validate_month, validate_year},
};

/// Summarise `owner`'s expenses for every day of `month` in `year`.
///
/// The result has exactly one entry per day of the month, in order. Days
/// without expenses have an empty summary.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `month` is not in 1..=12 and
/// [Error::InvalidYear] if `year` is not in 1..=9999.
pub fn daily_statistics_for_month(
    store: &impl AggregateStore,
    owner: UserID,
    month: u8,
    year: i32,
) -> Result<Vec<DailyExpenseSummary>, Error> {
    let month = validate_month(month)?;
    let year = validate_year(year)?;
    let day_count = days_in_month(year, month)?;

    let sparse = store.daily_expense_summaries(owner, year, month)?;

    Ok(fill_gaps(
        1..=day_count,
        sparse,
        |summary| summary.day,
        |day| DailyExpenseSummary {
            day,
            summary: ExpenseSummary::default(),
        },
    ))
}

/// Summarise `owner`'s expenses for every month of `year`.
///
/// The result always has twelve entries, January first.
///
/// # Errors
/// Returns [Error::InvalidYear] if `year` is not in 1..=9999.
pub fn monthly_statistics_for_year(
    store: &impl AggregateStore,
    owner: UserID,
    year: i32,
) -> Result<Vec<MonthlyExpenseSummary>, Error> {
    let year = validate_year(year)?;
    let sparse = store.monthly_expense_summaries(owner, year)?;

    Ok(fill_gaps(
        1..=12,
        sparse,
        |summary| summary.month,
        |month| MonthlyExpenseSummary {
            month,
            summary: ExpenseSummary::default(),
        },
    ))
}

/// Summarise `owner`'s expenses per month for each of `years`.
///
/// Only months with expenses are included, newest first. Duplicate years are
/// ignored and an empty `years` gives an empty result.
///
/// # Errors
/// Returns [Error::InvalidYear] if any year is not in 1..=9999.
pub fn monthly_statistics_for_years(
    store: &impl AggregateStore,
    owner: UserID,
    years: &[i32],
) -> Result<Vec<YearlyExpenseSummary>, Error> {
    let mut years = years
        .iter()
        .map(|year| validate_year(*year))
        .collect::<Result<Vec<_>, _>>()?;
    years.sort_unstable();
    years.dedup();

    if years.is_empty() {
        return Ok(Vec::new());
    }

    store.expense_summaries_for_years(owner, &years)
}

/// Summarise `owner`'s expenses per tag.
///
/// A transaction with several tags counts towards each of them. The tags
/// with the most spending come first.
///
/// # Errors
/// Returns [Error::NotFound] if none of `owner`'s expenses have tags.
pub fn tag_statistics(
    store: &impl AggregateStore,
    owner: UserID,
) -> Result<Vec<TagStatistic>, Error> {
    let statistics = store.tag_expense_summaries(owner)?;

    if statistics.is_empty() {
        return Err(Error::NotFound);
    }

    Ok(statistics)
}
