//! Defines the store trait for grouped expense and cash flow queries.

use crate::{
    Error,
    statistics::{
        DailyExpenseSummary, MonthlyCashFlow, MonthlyExpenseSummary, TagStatistic,
        YearlyExpenseSummary,
    },
    user::UserID,
};

/// Groups a user's transactions and summarises each group.
///
/// Expense queries only consider transactions with an amount of zero or less.
/// Groups without any transactions are omitted, callers that need a value for
/// every day or month fill the gaps themselves.
pub trait AggregateStore {
    /// Expenses in `month` of `year`, grouped by day, ordered by day.
    fn daily_expense_summaries(
        &self,
        owner: UserID,
        year: i32,
        month: u8,
    ) -> Result<Vec<DailyExpenseSummary>, Error>;

    /// Expenses in `year`, grouped by month, ordered by month.
    fn monthly_expense_summaries(
        &self,
        owner: UserID,
        year: i32,
    ) -> Result<Vec<MonthlyExpenseSummary>, Error>;

    /// Expenses in any of `years`, grouped by year and month, newest first.
    fn expense_summaries_for_years(
        &self,
        owner: UserID,
        years: &[i32],
    ) -> Result<Vec<YearlyExpenseSummary>, Error>;

    /// Expenses grouped by tag.
    ///
    /// A transaction with several tags counts towards each of them. Ordered
    /// by sum ascending, then count descending, then tag.
    fn tag_expense_summaries(&self, owner: UserID) -> Result<Vec<TagStatistic>, Error>;

    /// Income and spending for every month with at least one transaction,
    /// in chronological order.
    fn monthly_cash_flow(&self, owner: UserID) -> Result<Vec<MonthlyCashFlow>, Error>;
}
