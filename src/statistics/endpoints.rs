//! Route handlers for the statistics, balance and ratio endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::{Query, WithRejection};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    Error,
    app_state::StatisticsState,
    auth::CurrentUser,
    stores::{AggregateStore, TransactionStore},
};

use super::{
    CumulativeBalance, DailyExpenseSummary, IncomeSpent, MonthlyExpenseSummary, TagStatistic,
    YearlyExpenseSummary, balance, cumulative_balance_per_month, daily_statistics_for_month,
    income_spent_percentage, monthly_statistics_for_year, monthly_statistics_for_years,
    sum_of_expenses_for_month, tag_statistics,
};

/// The years to summarise, e.g. `?years=2023&years=2024`.
#[derive(Debug, Deserialize)]
pub struct YearsQuery {
    #[serde(default)]
    years: Vec<i32>,
}

/// Get the daily expense summaries for a month.
pub async fn get_daily_statistics<T, A>(
    State(state): State<StatisticsState<T, A>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Path((year, month)), _): WithRejection<Path<(i32, u8)>, Error>,
) -> Result<Json<Vec<DailyExpenseSummary>>, Error>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
{
    daily_statistics_for_month(&state.aggregate_store, owner, month, year).map(Json)
}

/// Get the monthly expense summaries for a year.
pub async fn get_monthly_statistics<T, A>(
    State(state): State<StatisticsState<T, A>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Path(year), _): WithRejection<Path<i32>, Error>,
) -> Result<Json<Vec<MonthlyExpenseSummary>>, Error>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
{
    monthly_statistics_for_year(&state.aggregate_store, owner, year).map(Json)
}

/// Get the monthly expense summaries for several years.
pub async fn get_statistics_for_years<T, A>(
    State(state): State<StatisticsState<T, A>>,
    CurrentUser(owner): CurrentUser,
    WithRejection(Query(query), _): WithRejection<Query<YearsQuery>, Error>,
) -> Result<Json<Vec<YearlyExpenseSummary>>, Error>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
{
    monthly_statistics_for_years(&state.aggregate_store, owner, &query.years).map(Json)
}

/// Get the expense summaries per tag.
pub async fn get_tag_statistics<T, A>(
    State(state): State<StatisticsState<T, A>>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<Vec<TagStatistic>>, Error>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
{
    tag_statistics(&state.aggregate_store, owner).map(Json)
}

/// Get the sum of the expenses in the current month (UTC).
pub async fn get_current_month_sum<T, A>(
    State(state): State<StatisticsState<T, A>>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<f64>, Error>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
{
    let today = OffsetDateTime::now_utc().date();

    sum_of_expenses_for_month(&state.transaction_store, owner, today).map(Json)
}

/// Get the balance over all transactions.
pub async fn get_balance<T, A>(
    State(state): State<StatisticsState<T, A>>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<f64>, Error>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
{
    balance(&state.transaction_store, owner).map(Json)
}

/// Get the share of income spent for each month.
pub async fn get_income_spent_percentage<T, A>(
    State(state): State<StatisticsState<T, A>>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<Vec<IncomeSpent>>, Error>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
{
    income_spent_percentage(&state.aggregate_store, owner).map(Json)
}

/// Get the balance at the end of each month.
pub async fn get_cumulative_balance<T, A>(
    State(state): State<StatisticsState<T, A>>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<Vec<CumulativeBalance>>, Error>
where
    T: TransactionStore + Send + Sync,
    A: AggregateStore + Send + Sync,
{
    cumulative_balance_per_month(&state.aggregate_store, owner).map(Json)
}
