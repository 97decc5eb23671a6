//! The result types produced by the statistics functions.

use std::fmt::Display;

use serde::{Serialize, Serializer};

/// Count, sum, average, maximum and minimum of a group of expense amounts.
///
/// Amounts are the stored (negative) values, so `max` is the expense closest
/// to zero and `min` is the largest expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExpenseSummary {
    /// The number of expenses in the group.
    pub count: u64,
    /// The sum of the amounts.
    pub sum: f64,
    /// The mean of the amounts.
    pub avg: f64,
    /// The greatest amount.
    pub max: f64,
    /// The smallest amount.
    pub min: f64,
}

/// The expenses of a single day in a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyExpenseSummary {
    /// The day of the month, starting at 1.
    pub day: u8,
    /// The expenses on that day.
    #[serde(flatten)]
    pub summary: ExpenseSummary,
}

/// The expenses of a single month in a year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyExpenseSummary {
    /// The month of the year, 1 is January.
    pub month: u8,
    /// The expenses in that month.
    #[serde(flatten)]
    pub summary: ExpenseSummary,
}

/// The expenses of a single month, keyed by year and month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyExpenseSummary {
    /// The calendar year.
    pub year: i32,
    /// The month of the year, 1 is January.
    pub month: u8,
    /// The expenses in that month.
    #[serde(flatten)]
    pub summary: ExpenseSummary,
}

/// The expenses carrying a particular tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagStatistic {
    /// The tag, as stored on the transactions.
    pub tag: String,
    /// The expenses carrying the tag.
    #[serde(flatten)]
    pub summary: ExpenseSummary,
}

/// A calendar month, serialized as `YYYY-MM`.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// The calendar year.
    pub year: i32,
    /// The month of the year, 1 is January.
    pub month: u8,
}

impl YearMonth {
    /// Create a year-month. The caller should ensure `month` is in 1..=12.
    pub fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The money earned and spent in a month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyCashFlow {
    /// The month the transactions fall in.
    pub month: YearMonth,
    /// Sum of the positive amounts.
    pub income: f64,
    /// Sum of the negative amounts, as a positive number.
    pub spent: f64,
}

/// How much of a month's income was spent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSpent {
    /// The month the transactions fall in.
    pub month: YearMonth,
    /// Sum of the payments in the month.
    pub total_income: f64,
    /// Sum of the expenses in the month, as a positive number.
    pub total_spent: f64,
    /// `total_spent` as a percentage of `total_income`, `None` without income.
    pub spent_percentage: Option<f64>,
}

/// The balance at the end of a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeBalance {
    /// The month the balance was taken at the end of.
    pub year_month: YearMonth,
    /// The sum of every amount up to and including this month.
    pub cumulative_balance: f64,
}
