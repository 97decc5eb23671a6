//! Aggregates a user's transactions into time bucketed and per tag
//! summaries, plus balance and income ratios.
//!
//! Only expenses (amounts of zero or less) are summarised. Daily and monthly
//! series are dense: every day of the month, or every month of the year, gets
//! an entry even when nothing was spent.

mod balance;
mod buckets;
mod endpoints;
mod expenses;
mod summary;

pub use balance::{
    balance, cumulative_balance_per_month, income_spent_percentage, sum_of_expenses_for_month,
};
pub use buckets::days_in_month;
pub use endpoints::{
    get_balance, get_cumulative_balance, get_current_month_sum, get_daily_statistics,
    get_income_spent_percentage, get_monthly_statistics, get_statistics_for_years,
    get_tag_statistics,
};
pub use expenses::{
    daily_statistics_for_month, monthly_statistics_for_year, monthly_statistics_for_years,
    tag_statistics,
};
pub use summary::{
    CumulativeBalance, DailyExpenseSummary, ExpenseSummary, IncomeSpent, MonthlyCashFlow,
    MonthlyExpenseSummary, TagStatistic, YearMonth, YearlyExpenseSummary,
};
