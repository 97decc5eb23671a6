//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{
    Connection, Row, params_from_iter,
    types::{Type, Value},
};

use crate::{
    Error,
    database_id::TransactionId,
    db::{CreateTable, MapRow},
    stores::{TransactionQuery, TransactionStore},
    tag::Tags,
    timestamp::{parse_db_timestamp, to_db_timestamp},
    transaction::{Transaction, TransactionBuilder, TransactionKind, TransactionPatch},
    user::UserID,
};

use super::lock;

const COLUMNS: &str = "id, user_id, name, amount, date, tags, seller, note";

/// Stores transactions in a SQLite database.
///
/// Transactions reference their owner, so the user table must be set up in
/// the database too.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error,
    /// e.g. the owner does not exist.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = lock(&self.connection)?
            .prepare(&format!(
                "INSERT INTO \"transaction\" (user_id, name, amount, date, tags, seller, note)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING {COLUMNS}"
            ))?
            .query_row(
                (
                    builder.owner.as_i64(),
                    builder.name,
                    builder.amount,
                    to_db_timestamp(builder.date)?,
                    builder.tags,
                    builder.seller,
                    builder.note,
                ),
                Self::map_row,
            )?;

        tracing::debug!("Created transaction {} for user {}", transaction.id, transaction.owner);

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction owned by `owner`,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, owner: UserID, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = lock(&self.connection)?
            .prepare(&format!(
                "SELECT {COLUMNS} FROM \"transaction\" WHERE id = ?1 AND user_id = ?2"
            ))?
            .query_row((id, owner.as_i64()), Self::map_row)?;

        Ok(transaction)
    }

    /// Query for transactions in the database.
    ///
    /// Transactions are ordered by date, newest first, and then by ID so that
    /// pages stay stable when several transactions share a date.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if the limit or offset is larger than SQLite can bind,
    /// - [Error::InvalidDate] if a date bound cannot be stored,
    /// - or [Error::SqlError] there is a SQL error.
    fn get_query(
        &self,
        owner: UserID,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, Error> {
        let (where_clause, mut parameters) = build_where_clause(owner, query)?;

        let mut query_string =
            format!("SELECT {COLUMNS} FROM \"transaction\" {where_clause} ORDER BY date DESC, id DESC");

        let limit = query
            .limit
            .map(|limit| to_sql_integer("limit", limit))
            .transpose()?;
        let offset = to_sql_integer("offset", query.offset)?;

        match (limit, offset) {
            (Some(limit), offset) => {
                query_string.push_str(" LIMIT ? OFFSET ?");
                parameters.extend([Value::Integer(limit), Value::Integer(offset)]);
            }
            // SQLite only accepts OFFSET after a LIMIT, a negative limit means no limit.
            (None, offset) if offset > 0 => {
                query_string.push_str(" LIMIT -1 OFFSET ?");
                parameters.push(Value::Integer(offset));
            }
            (None, _) => {}
        }

        lock(&self.connection)?
            .prepare(&query_string)?
            .query_map(params_from_iter(parameters.iter()), Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Apply `patch` to the transaction `id` in a single statement.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NoFieldsToUpdate] if `patch` is empty,
    /// - [Error::NotFound] if `id` does not refer to a transaction owned by `owner`,
    /// - or [Error::SqlError] there is some other SQL error.
    fn update(
        &mut self,
        owner: UserID,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> Result<Transaction, Error> {
        if patch.is_empty() {
            return Err(Error::NoFieldsToUpdate);
        }

        let mut assignments = Vec::new();
        let mut parameters = Vec::new();

        if let Some(name) = patch.name {
            assignments.push("name = ?");
            parameters.push(Value::Text(name));
        }

        if let Some(amount) = patch.amount {
            assignments.push("amount = ?");
            parameters.push(Value::Real(amount));
        }

        if let Some(tags) = patch.tags {
            assignments.push("tags = ?");
            parameters.push(tags_to_value(&tags)?);
        }

        if let Some(date) = patch.date {
            assignments.push("date = ?");
            parameters.push(Value::Text(to_db_timestamp(date)?));
        }

        parameters.push(Value::Integer(id));
        parameters.push(Value::Integer(owner.as_i64()));

        let query_string = format!(
            "UPDATE \"transaction\" SET {} WHERE id = ? AND user_id = ? RETURNING {COLUMNS}",
            assignments.join(", ")
        );

        let transaction = lock(&self.connection)?
            .prepare(&query_string)?
            .query_row(params_from_iter(parameters.iter()), Self::map_row)?;

        Ok(transaction)
    }

    /// Delete the transaction `id` and return its last state.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction owned by `owner`,
    /// - or [Error::SqlError] there is some other SQL error.
    fn delete(&mut self, owner: UserID, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = lock(&self.connection)?
            .prepare(&format!(
                "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2 RETURNING {COLUMNS}"
            ))?
            .query_row((id, owner.as_i64()), Self::map_row)?;

        tracing::debug!("Deleted transaction {id} for user {owner}");

        Ok(transaction)
    }

    /// Sum the amounts of the matching transactions.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn sum(&self, owner: UserID, query: &TransactionQuery) -> Result<f64, Error> {
        let (where_clause, parameters) = build_where_clause(owner, query)?;

        lock(&self.connection)?
            .query_row(
                &format!("SELECT COALESCE(SUM(amount), 0.0) FROM \"transaction\" {where_clause}"),
                params_from_iter(parameters.iter()),
                |row| row.get(0),
            )
            .map_err(Error::from)
    }
}

/// Build the WHERE clause for `query` and the values for its placeholders.
fn build_where_clause(
    owner: UserID,
    query: &TransactionQuery,
) -> Result<(String, Vec<Value>), Error> {
    let mut clauses = vec!["user_id = ?".to_owned()];
    let mut parameters = vec![Value::Integer(owner.as_i64())];

    if let Some(ids) = &query.ids {
        if ids.is_empty() {
            clauses.push("0".to_owned());
        } else {
            clauses.push(format!("id IN ({})", placeholders(ids.len())));
            parameters.extend(ids.iter().map(|id| Value::Integer(*id)));
        }
    }

    if let Some(name) = &query.name {
        clauses.push("name LIKE ? ESCAPE '\\'".to_owned());
        parameters.push(Value::Text(format!("%{}%", escape_like(name))));
    }

    if let Some(min_amount) = query.min_amount {
        clauses.push("amount >= ?".to_owned());
        parameters.push(Value::Real(min_amount));
    }

    if let Some(max_amount) = query.max_amount {
        clauses.push("amount <= ?".to_owned());
        parameters.push(Value::Real(max_amount));
    }

    match query.kind {
        Some(TransactionKind::Expense) => clauses.push("amount <= 0".to_owned()),
        Some(TransactionKind::Payment) => clauses.push("amount > 0".to_owned()),
        None => {}
    }

    if !query.tags.is_empty() {
        clauses.push(format!(
            "EXISTS (SELECT 1 FROM json_each(\"transaction\".tags) WHERE json_each.value IN ({}))",
            placeholders(query.tags.len())
        ));
        parameters.extend(query.tags.iter().map(|tag| Value::Text(tag.clone())));
    }

    if let Some(date_from) = query.date_from {
        clauses.push("date >= ?".to_owned());
        parameters.push(Value::Text(to_db_timestamp(date_from)?));
    }

    if let Some(date_to) = query.date_to {
        clauses.push("date <= ?".to_owned());
        parameters.push(Value::Text(to_db_timestamp(date_to)?));
    }

    Ok((format!("WHERE {}", clauses.join(" AND ")), parameters))
}

/// Convert a page size or position to the signed integer that SQLite binds.
fn to_sql_integer(name: &str, value: u64) -> Result<i64, Error> {
    i64::try_from(value)
        .map_err(|_| Error::Validation(format!("{name} must be at most {}", i64::MAX)))
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Escape the LIKE wildcards in `text` so it is matched literally.
fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn tags_to_value(tags: &Tags) -> Result<Value, Error> {
    serde_json::to_string(tags)
        .map(Value::Text)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL,
                    name TEXT NOT NULL,
                    amount REAL NOT NULL,
                    date TEXT NOT NULL,
                    tags TEXT NOT NULL DEFAULT '[]',
                    seller TEXT,
                    note TEXT,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    );
            CREATE INDEX IF NOT EXISTS transaction_user_date ON \"transaction\" (user_id, date);",
        )
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_date: String = row.get(offset + 4)?;
        let date = parse_db_timestamp(&raw_date).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(offset + 4, Type::Text, Box::new(error))
        })?;

        Ok(Transaction {
            id: row.get(offset)?,
            owner: UserID::new(row.get(offset + 1)?),
            name: row.get(offset + 2)?,
            amount: row.get(offset + 3)?,
            date,
            tags: row.get(offset + 5)?,
            seller: row.get(offset + 6)?,
            note: row.get(offset + 7)?,
        })
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        PasswordHash, UserID,
        stores::{
            TransactionQuery, TransactionStore, UserStore,
            sqlite::{SQLAppState, create_app_state},
        },
        tag::Tags,
        transaction::{Transaction, TransactionBuilder, TransactionKind, TransactionPatch},
    };

    use super::{Error, escape_like};

    fn get_app_state() -> (SQLAppState, UserID) {
        let conn = Connection::open_in_memory().unwrap();
        let mut state = create_app_state(conn, "stneaoetse").unwrap();
        let user = state
            .user_store
            .create("test", PasswordHash::new_unchecked("hunter2"))
            .unwrap();

        (state, user.id)
    }

    fn create_other_user(state: &mut SQLAppState) -> UserID {
        state
            .user_store
            .create("other", PasswordHash::new_unchecked("hunter3"))
            .unwrap()
            .id
    }

    fn expense(owner: UserID, name: &str, price: f64) -> TransactionBuilder {
        TransactionBuilder::expense(owner, name, price).unwrap()
    }

    fn payment(owner: UserID, name: &str, price: f64) -> TransactionBuilder {
        TransactionBuilder::payment(owner, name, price).unwrap()
    }

    #[test]
    fn create_succeeds() {
        let (mut state, owner) = get_app_state();
        let builder = expense(owner, "Groceries", 45.5)
            .date(datetime!(2024-02-29 12:30:00 UTC))
            .unwrap()
            .tags(Tags::new(["food", "weekly"]))
            .seller(Some("Supermarket".to_owned()))
            .note(Some("milk and bread".to_owned()));

        let transaction = state.transaction_store.create(builder.clone()).unwrap();

        assert!(transaction.id > 0);
        assert_eq!(transaction.owner, owner);
        assert_eq!(transaction.name, builder.name);
        assert_eq!(transaction.amount, -45.5);
        assert_eq!(transaction.date, builder.date);
        assert_eq!(transaction.tags, builder.tags);
        assert_eq!(transaction.seller, builder.seller);
        assert_eq!(transaction.note, builder.note);
    }

    #[test]
    fn create_fails_for_missing_owner() {
        let (mut state, _) = get_app_state();

        let result = state
            .transaction_store
            .create(expense(UserID::new(999), "Groceries", 1.0));

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn get_returns_created_transaction() {
        let (mut state, owner) = get_app_state();
        let want = state
            .transaction_store
            .create(expense(owner, "Groceries", 1.0))
            .unwrap();

        let got = state.transaction_store.get(owner, want.id).unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn get_fails_for_other_owner() {
        let (mut state, owner) = get_app_state();
        let other = create_other_user(&mut state);
        let transaction = state
            .transaction_store
            .create(expense(owner, "Groceries", 1.0))
            .unwrap();

        assert_eq!(
            state.transaction_store.get(other, transaction.id),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn get_query_with_empty_filter_returns_all_newest_first() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let old = store
            .create(expense(owner, "Old", 1.0).date(datetime!(2024-01-01 0:00 UTC)).unwrap())
            .unwrap();
        let new = store
            .create(payment(owner, "New", 10.0).date(datetime!(2024-03-01 0:00 UTC)).unwrap())
            .unwrap();
        let same_date = store
            .create(expense(owner, "Same date", 2.0).date(datetime!(2024-03-01 0:00 UTC)).unwrap())
            .unwrap();

        let got = store
            .get_query(owner, &TransactionQuery::default())
            .unwrap();

        assert_eq!(got, vec![same_date, new, old]);
    }

    #[test]
    fn get_query_returns_empty_vec_when_nothing_matches() {
        let (state, owner) = get_app_state();

        let got = state
            .transaction_store
            .get_query(owner, &TransactionQuery::default())
            .unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn get_query_excludes_other_owners() {
        let (mut state, owner) = get_app_state();
        let other = create_other_user(&mut state);
        state
            .transaction_store
            .create(expense(other, "Not mine", 1.0))
            .unwrap();

        let got = state
            .transaction_store
            .get_query(owner, &TransactionQuery::default())
            .unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn get_query_filters_by_kind() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let groceries = store.create(expense(owner, "Groceries", 5.0)).unwrap();
        let salary = store.create(payment(owner, "Salary", 100.0)).unwrap();

        let expenses = store.get_query(owner, &TransactionQuery::expenses()).unwrap();
        let payments = store.get_query(owner, &TransactionQuery::payments()).unwrap();

        assert_eq!(expenses, vec![groceries]);
        assert_eq!(payments, vec![salary]);
    }

    #[test]
    fn get_query_matches_name_case_insensitively() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let want = store.create(expense(owner, "Coffee Beans", 5.0)).unwrap();
        store.create(expense(owner, "Tea", 5.0)).unwrap();

        let got = store
            .get_query(
                owner,
                &TransactionQuery {
                    name: Some("coffee".to_owned()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn get_query_treats_like_wildcards_literally() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let want = store.create(expense(owner, "100% juice", 5.0)).unwrap();
        store.create(expense(owner, "100 apples", 5.0)).unwrap();

        let got = store
            .get_query(
                owner,
                &TransactionQuery {
                    name: Some("0%".to_owned()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(got, vec![want]);
        assert_eq!(escape_like(r"a_b%c\"), r"a\_b\%c\\");
    }

    #[test]
    fn get_query_matches_any_tag() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let food = store
            .create(expense(owner, "Lunch", 5.0).tags(Tags::new(["food", "work"])))
            .unwrap();
        let rent = store
            .create(expense(owner, "Rent", 500.0).tags(Tags::new(["housing"])))
            .unwrap();
        store.create(expense(owner, "Untagged", 1.0)).unwrap();

        let got = store
            .get_query(
                owner,
                &TransactionQuery {
                    tags: vec!["housing".to_owned(), "food".to_owned()],
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(got.len(), 2);
        assert!(got.contains(&food));
        assert!(got.contains(&rent));
    }

    #[test]
    fn get_query_date_range_is_inclusive() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let start = datetime!(2024-01-10 0:00 UTC);
        let end = datetime!(2024-01-20 0:00 UTC);
        let on_start = store.create(expense(owner, "Start", 1.0).date(start).unwrap()).unwrap();
        let on_end = store.create(expense(owner, "End", 1.0).date(end).unwrap()).unwrap();
        store
            .create(expense(owner, "Before", 1.0).date(datetime!(2024-01-09 23:59:59 UTC)).unwrap())
            .unwrap();
        store
            .create(expense(owner, "After", 1.0).date(datetime!(2024-01-20 0:00:01 UTC)).unwrap())
            .unwrap();

        let got = store
            .get_query(
                owner,
                &TransactionQuery {
                    date_from: Some(start),
                    date_to: Some(end),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(got, vec![on_end, on_start]);
    }

    #[test]
    fn get_query_amount_bounds_are_inclusive() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        store.create(expense(owner, "Small", 1.0)).unwrap();
        let medium = store.create(expense(owner, "Medium", 10.0)).unwrap();
        store.create(expense(owner, "Large", 100.0)).unwrap();

        let got = store
            .get_query(
                owner,
                &TransactionQuery {
                    min_amount: Some(-10.0),
                    max_amount: Some(-10.0),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(got, vec![medium]);
    }

    #[test]
    fn get_query_filters_by_ids() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let want = store.create(expense(owner, "Wanted", 1.0)).unwrap();
        store.create(expense(owner, "Unwanted", 1.0)).unwrap();

        let got = store
            .get_query(
                owner,
                &TransactionQuery {
                    ids: Some(vec![want.id]),
                    ..Default::default()
                },
            )
            .unwrap();
        let none = store
            .get_query(
                owner,
                &TransactionQuery {
                    ids: Some(vec![]),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(got, vec![want]);
        assert!(none.is_empty());
    }

    #[test]
    fn get_query_applies_limit_and_offset_after_ordering() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let mut created: Vec<Transaction> = (1..=5)
            .map(|day| {
                store
                    .create(
                        expense(owner, &format!("Day {day}"), 1.0)
                            .date(datetime!(2024-01-01 0:00 UTC) + time::Duration::days(day))
                            .unwrap(),
                    )
                    .unwrap()
            })
            .collect();
        created.reverse();

        let page = store
            .get_query(
                owner,
                &TransactionQuery {
                    limit: Some(2),
                    offset: 1,
                    ..Default::default()
                },
            )
            .unwrap();
        let rest = store
            .get_query(
                owner,
                &TransactionQuery {
                    offset: 3,
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(page, created[1..3]);
        assert_eq!(rest, created[3..]);
    }

    #[test]
    fn get_query_accepts_the_largest_limit() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let want = store.create(expense(owner, "Coffee", 4.5)).unwrap();

        let got = store
            .get_query(
                owner,
                &TransactionQuery {
                    limit: Some(i64::MAX as u64),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn get_query_rejects_limit_or_offset_sqlite_cannot_bind() {
        let (state, owner) = get_app_state();
        let store = &state.transaction_store;

        let huge_limit = store.get_query(
            owner,
            &TransactionQuery {
                limit: Some(u64::MAX),
                ..Default::default()
            },
        );
        let huge_offset = store.get_query(
            owner,
            &TransactionQuery {
                offset: i64::MAX as u64 + 1,
                ..Default::default()
            },
        );

        assert!(matches!(huge_limit, Err(Error::Validation(_))));
        assert!(matches!(huge_offset, Err(Error::Validation(_))));
    }

    #[test]
    fn get_query_agrees_with_in_memory_filter() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let mut all = Vec::new();
        for (index, name) in ["Coffee", "coffee beans", "Rent", "Salary", "Lunch"]
            .into_iter()
            .enumerate()
        {
            let builder = if name == "Salary" {
                payment(owner, name, 1000.0)
            } else {
                expense(owner, name, 5.0 * (index + 1) as f64)
            };
            let tags = if index % 2 == 0 {
                Tags::new(["even"])
            } else {
                Tags::new(["odd", "food"])
            };
            let date = datetime!(2024-06-01 0:00 UTC) + time::Duration::days(index as i64);
            all.push(store.create(builder.tags(tags).date(date).unwrap()).unwrap());
        }

        let queries = [
            TransactionQuery {
                name: Some("COFFEE".to_owned()),
                ..Default::default()
            },
            TransactionQuery {
                tags: vec!["food".to_owned()],
                kind: Some(TransactionKind::Expense),
                ..Default::default()
            },
            TransactionQuery {
                max_amount: Some(-10.0),
                date_from: Some(datetime!(2024-06-02 0:00 UTC)),
                ..Default::default()
            },
        ];

        for query in queries {
            let got = store.get_query(owner, &query).unwrap();
            let mut want: Vec<Transaction> = all
                .iter()
                .filter(|transaction| query.matches(transaction))
                .cloned()
                .collect();
            want.reverse();

            assert_eq!(got, want, "query {query:?}");
        }
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let original = store
            .create(
                expense(owner, "Lunch", 5.0)
                    .tags(Tags::new(["food"]))
                    .note(Some("with friends".to_owned())),
            )
            .unwrap();

        let updated = store
            .update(
                owner,
                original.id,
                TransactionPatch {
                    amount: Some(-7.5),
                    tags: Some(Tags::new(["food", "treat"])),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(
            updated,
            Transaction {
                amount: -7.5,
                tags: Tags::new(["food", "treat"]),
                ..original.clone()
            }
        );
        assert_eq!(store.get(owner, original.id).unwrap(), updated);
    }

    #[test]
    fn update_fails_on_empty_patch() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let transaction = store.create(expense(owner, "Lunch", 5.0)).unwrap();

        let result = store.update(owner, transaction.id, TransactionPatch::default());

        assert_eq!(result, Err(Error::NoFieldsToUpdate));
    }

    #[test]
    fn update_fails_for_missing_or_foreign_transaction() {
        let (mut state, owner) = get_app_state();
        let other = create_other_user(&mut state);
        let store = &mut state.transaction_store;
        let transaction = store.create(expense(owner, "Lunch", 5.0)).unwrap();
        let patch = TransactionPatch {
            name: Some("Dinner".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            store.update(owner, transaction.id + 1, patch.clone()),
            Err(Error::NotFound)
        );
        assert_eq!(
            store.update(other, transaction.id, patch),
            Err(Error::NotFound)
        );
        assert_eq!(store.get(owner, transaction.id).unwrap(), transaction);
    }

    #[test]
    fn update_after_delete_is_not_found() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let transaction = store.create(expense(owner, "Lunch", 5.0)).unwrap();
        store.delete(owner, transaction.id).unwrap();

        let result = store.update(
            owner,
            transaction.id,
            TransactionPatch {
                amount: Some(-1.0),
                ..Default::default()
            },
        );

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_returns_prior_state() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        let transaction = store.create(expense(owner, "Lunch", 5.0)).unwrap();

        let deleted = store.delete(owner, transaction.id).unwrap();

        assert_eq!(deleted, transaction);
        assert_eq!(store.get(owner, transaction.id), Err(Error::NotFound));
    }

    #[test]
    fn delete_fails_for_other_owner() {
        let (mut state, owner) = get_app_state();
        let other = create_other_user(&mut state);
        let store = &mut state.transaction_store;
        let transaction = store.create(expense(owner, "Lunch", 5.0)).unwrap();

        assert_eq!(store.delete(other, transaction.id), Err(Error::NotFound));
        assert_eq!(store.get(owner, transaction.id).unwrap(), transaction);
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        let (state, owner) = get_app_state();

        let sum = state
            .transaction_store
            .sum(owner, &TransactionQuery::default())
            .unwrap();

        assert_eq!(sum, 0.0);
    }

    #[test]
    fn sum_respects_filter() {
        let (mut state, owner) = get_app_state();
        let store = &mut state.transaction_store;
        store.create(expense(owner, "Lunch", 5.0)).unwrap();
        store.create(expense(owner, "Dinner", 15.0)).unwrap();
        store.create(payment(owner, "Salary", 100.0)).unwrap();

        let balance = store.sum(owner, &TransactionQuery::default()).unwrap();
        let spent = store.sum(owner, &TransactionQuery::expenses()).unwrap();

        assert_eq!(balance, 80.0);
        assert_eq!(spent, -20.0);
    }
}
