//! Implements the grouped expense and cash flow queries with SQLite.
//!
//! Dates are stored as `YYYY-MM-DD HH:MM:SS` text in UTC, so `strftime` gives
//! the calendar day, month and year of a transaction directly.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};

use crate::{
    Error,
    statistics::{
        DailyExpenseSummary, ExpenseSummary, MonthlyCashFlow, MonthlyExpenseSummary,
        TagStatistic, YearMonth, YearlyExpenseSummary,
    },
    stores::AggregateStore,
    user::UserID,
};

use super::lock;

const SUMMARY_COLUMNS: &str = "COUNT(*), SUM(amount), AVG(amount), MAX(amount), MIN(amount)";
const YEAR: &str = "CAST(strftime('%Y', date) AS INTEGER)";
const MONTH: &str = "CAST(strftime('%m', date) AS INTEGER)";
const DAY: &str = "CAST(strftime('%d', date) AS INTEGER)";

/// Runs grouped queries over the transaction table.
#[derive(Debug, Clone)]
pub struct SQLiteAggregateStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteAggregateStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

/// Read the five summary columns starting at `offset`.
fn map_summary(row: &Row, offset: usize) -> Result<ExpenseSummary, rusqlite::Error> {
    let count: i64 = row.get(offset)?;

    Ok(ExpenseSummary {
        count: count.max(0) as u64,
        sum: row.get(offset + 1)?,
        avg: row.get(offset + 2)?,
        max: row.get(offset + 3)?,
        min: row.get(offset + 4)?,
    })
}

impl AggregateStore for SQLiteAggregateStore {
    fn daily_expense_summaries(
        &self,
        owner: UserID,
        year: i32,
        month: u8,
    ) -> Result<Vec<DailyExpenseSummary>, Error> {
        let query = format!(
            "SELECT {DAY}, {SUMMARY_COLUMNS} FROM \"transaction\" \
            WHERE user_id = ?1 AND amount <= 0 AND {YEAR} = ?2 AND {MONTH} = ?3 \
            GROUP BY 1 ORDER BY 1"
        );

        lock(&self.connection)?
            .prepare(&query)?
            .query_map((owner.as_i64(), year, month), |row| {
                Ok(DailyExpenseSummary {
                    day: row.get(0)?,
                    summary: map_summary(row, 1)?,
                })
            })?
            .map(|maybe_summary| maybe_summary.map_err(Error::from))
            .collect()
    }

    fn monthly_expense_summaries(
        &self,
        owner: UserID,
        year: i32,
    ) -> Result<Vec<MonthlyExpenseSummary>, Error> {
        let query = format!(
            "SELECT {MONTH}, {SUMMARY_COLUMNS} FROM \"transaction\" \
            WHERE user_id = ?1 AND amount <= 0 AND {YEAR} = ?2 \
            GROUP BY 1 ORDER BY 1"
        );

        lock(&self.connection)?
            .prepare(&query)?
            .query_map((owner.as_i64(), year), |row| {
                Ok(MonthlyExpenseSummary {
                    month: row.get(0)?,
                    summary: map_summary(row, 1)?,
                })
            })?
            .map(|maybe_summary| maybe_summary.map_err(Error::from))
            .collect()
    }

    fn expense_summaries_for_years(
        &self,
        owner: UserID,
        years: &[i32],
    ) -> Result<Vec<YearlyExpenseSummary>, Error> {
        if years.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; years.len()].join(", ");
        let query = format!(
            "SELECT {YEAR}, {MONTH}, {SUMMARY_COLUMNS} FROM \"transaction\" \
            WHERE user_id = ? AND amount <= 0 AND {YEAR} IN ({placeholders}) \
            GROUP BY 1, 2 ORDER BY 1 DESC, 2 DESC"
        );

        let parameters = std::iter::once(Value::Integer(owner.as_i64()))
            .chain(years.iter().map(|year| Value::Integer(i64::from(*year))));

        lock(&self.connection)?
            .prepare(&query)?
            .query_map(params_from_iter(parameters), |row| {
                Ok(YearlyExpenseSummary {
                    year: row.get(0)?,
                    month: row.get(1)?,
                    summary: map_summary(row, 2)?,
                })
            })?
            .map(|maybe_summary| maybe_summary.map_err(Error::from))
            .collect()
    }

    fn tag_expense_summaries(&self, owner: UserID) -> Result<Vec<TagStatistic>, Error> {
        lock(&self.connection)?
            .prepare(&format!(
                "SELECT tag.value, {SUMMARY_COLUMNS} \
                FROM \"transaction\", json_each(\"transaction\".tags) AS tag \
                WHERE user_id = ?1 AND amount <= 0 \
                GROUP BY tag.value \
                ORDER BY SUM(amount) ASC, COUNT(*) DESC, tag.value ASC"
            ))?
            .query_map([owner.as_i64()], |row| {
                Ok(TagStatistic {
                    tag: row.get(0)?,
                    summary: map_summary(row, 1)?,
                })
            })?
            .map(|maybe_statistic| maybe_statistic.map_err(Error::from))
            .collect()
    }

    fn monthly_cash_flow(&self, owner: UserID) -> Result<Vec<MonthlyCashFlow>, Error> {
        lock(&self.connection)?
            .prepare(&format!(
                "SELECT {YEAR}, {MONTH}, \
                    COALESCE(SUM(CASE WHEN amount > 0 THEN amount END), 0.0), \
                    COALESCE(SUM(CASE WHEN amount < 0 THEN -amount END), 0.0) \
                FROM \"transaction\" WHERE user_id = ?1 \
                GROUP BY 1, 2 ORDER BY 1, 2"
            ))?
            .query_map([owner.as_i64()], |row| {
                Ok(MonthlyCashFlow {
                    month: YearMonth::new(row.get(0)?, row.get(1)?),
                    income: row.get(2)?,
                    spent: row.get(3)?,
                })
            })?
            .map(|maybe_cash_flow| maybe_cash_flow.map_err(Error::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        PasswordHash, UserID,
        statistics::{ExpenseSummary, MonthlyCashFlow, TagStatistic, YearMonth},
        stores::{
            AggregateStore, TransactionStore, UserStore,
            sqlite::{SQLAppState, create_app_state},
        },
        tag::Tags,
        transaction::TransactionBuilder,
    };

    fn get_app_state() -> (SQLAppState, UserID) {
        let conn = Connection::open_in_memory().unwrap();
        let mut state = create_app_state(conn, "stneaoetse").unwrap();
        let user = state
            .user_store
            .create("test", PasswordHash::new_unchecked("hunter2"))
            .unwrap();

        (state, user.id)
    }

    #[test]
    fn daily_summaries_ignore_payments_and_other_months() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        for (price, date) in [
            (10.0, datetime!(2024-02-03 9:00 UTC)),
            (30.0, datetime!(2024-02-03 18:00 UTC)),
            (5.0, datetime!(2024-03-03 9:00 UTC)),
        ] {
            store
                .create(
                    TransactionBuilder::expense(owner, "Food", price)
                        .unwrap()
                        .date(date)
                        .unwrap(),
                )
                .unwrap();
        }
        store
            .create(
                TransactionBuilder::payment(owner, "Salary", 100.0)
                    .unwrap()
                    .date(datetime!(2024-02-03 12:00 UTC))
                    .unwrap(),
            )
            .unwrap();

        let got = state
            .aggregate_store
            .daily_expense_summaries(owner, 2024, 2)
            .unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].day, 3);
        assert_eq!(
            got[0].summary,
            ExpenseSummary {
                count: 2,
                sum: -40.0,
                avg: -20.0,
                max: -10.0,
                min: -30.0,
            }
        );
    }

    #[test]
    fn summaries_for_years_are_newest_first() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        for date in [
            datetime!(2022-05-01 0:00 UTC),
            datetime!(2023-01-01 0:00 UTC),
            datetime!(2023-11-01 0:00 UTC),
            datetime!(2024-01-01 0:00 UTC),
        ] {
            store
                .create(
                    TransactionBuilder::expense(owner, "Food", 1.0)
                        .unwrap()
                        .date(date)
                        .unwrap(),
                )
                .unwrap();
        }

        let got: Vec<(i32, u8)> = state
            .aggregate_store
            .expense_summaries_for_years(owner, &[2022, 2023])
            .unwrap()
            .into_iter()
            .map(|summary| (summary.year, summary.month))
            .collect();

        assert_eq!(got, vec![(2023, 11), (2023, 1), (2022, 5)]);
    }

    #[test]
    fn tag_summaries_fan_out_and_order_by_sum() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        for (price, tags) in [
            (10.0, vec!["food", "work"]),
            (50.0, vec!["rent"]),
            (5.0, vec!["food"]),
        ] {
            store
                .create(
                    TransactionBuilder::expense(owner, "Thing", price)
                        .unwrap()
                        .tags(Tags::new(tags)),
                )
                .unwrap();
        }

        let got = state.aggregate_store.tag_expense_summaries(owner).unwrap();

        assert_eq!(
            got,
            vec![
                TagStatistic {
                    tag: "rent".to_owned(),
                    summary: ExpenseSummary {
                        count: 1,
                        sum: -50.0,
                        avg: -50.0,
                        max: -50.0,
                        min: -50.0
                    },
                },
                TagStatistic {
                    tag: "food".to_owned(),
                    summary: ExpenseSummary {
                        count: 2,
                        sum: -15.0,
                        avg: -7.5,
                        max: -5.0,
                        min: -10.0
                    },
                },
                TagStatistic {
                    tag: "work".to_owned(),
                    summary: ExpenseSummary {
                        count: 1,
                        sum: -10.0,
                        avg: -10.0,
                        max: -10.0,
                        min: -10.0
                    },
                },
            ]
        );
    }

    #[test]
    fn tag_summaries_break_ties_by_count_then_name() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        for (price, tag) in [(10.0, "b"), (10.0, "a"), (5.0, "c"), (5.0, "c")] {
            store
                .create(
                    TransactionBuilder::expense(owner, "Thing", price)
                        .unwrap()
                        .tags(Tags::new([tag])),
                )
                .unwrap();
        }

        let got: Vec<String> = state
            .aggregate_store
            .tag_expense_summaries(owner)
            .unwrap()
            .into_iter()
            .map(|statistic| statistic.tag)
            .collect();

        assert_eq!(got, vec!["c", "a", "b"]);
    }

    #[test]
    fn cash_flow_splits_income_and_spending() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        store
            .create(
                TransactionBuilder::payment(owner, "Salary", 1000.0)
                    .unwrap()
                    .date(datetime!(2024-01-15 0:00 UTC))
                    .unwrap(),
            )
            .unwrap();
        store
            .create(
                TransactionBuilder::expense(owner, "Rent", 400.0)
                    .unwrap()
                    .date(datetime!(2024-01-20 0:00 UTC))
                    .unwrap(),
            )
            .unwrap();
        store
            .create(
                TransactionBuilder::expense(owner, "Food", 50.0)
                    .unwrap()
                    .date(datetime!(2023-12-20 0:00 UTC))
                    .unwrap(),
            )
            .unwrap();

        let got = state.aggregate_store.monthly_cash_flow(owner).unwrap();

        assert_eq!(
            got,
            vec![
                MonthlyCashFlow {
                    month: YearMonth::new(2023, 12),
                    income: 0.0,
                    spent: 50.0,
                },
                MonthlyCashFlow {
                    month: YearMonth::new(2024, 1),
                    income: 1000.0,
                    spent: 400.0,
                },
            ]
        );
    }
}
