//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
};

use crate::{
    AppState, Error,
    auth::{log_in, sign_up},
    endpoints,
    logging::logging_middleware,
    statistics::{
        get_balance, get_cumulative_balance, get_current_month_sum, get_daily_statistics,
        get_income_spent_percentage, get_monthly_statistics, get_statistics_for_years,
        get_tag_statistics,
    },
    stores::{AggregateStore, TransactionStore, UserStore},
    transaction::{
        create_expense, create_payment, delete_expense, get_transaction, list_expenses,
        list_payments, update_expense, update_payment,
    },
};

/// Return a router with all the app's routes.
///
/// Protected routes authenticate the caller through the
/// [CurrentUser](crate::auth::CurrentUser) extractor, so they respond with
/// 401 before looking at the rest of the request.
pub fn build_router<T, A, U>(state: AppState<T, A, U>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
    A: AggregateStore + Clone + Send + Sync + 'static,
    U: UserStore + Clone + Send + Sync + 'static,
{
    let unprotected_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::SIGN_UP, post(sign_up::<U>))
        .route(endpoints::LOG_IN, post(log_in::<U>));

    let expense_routes = Router::new()
        .route(
            endpoints::EXPENSES,
            post(create_expense::<T>).get(list_expenses::<T>),
        )
        .route(
            endpoints::EXPENSE,
            put(update_expense::<T>).delete(delete_expense::<T>),
        )
        .route(endpoints::DAILY_STATISTICS, get(get_daily_statistics::<T, A>))
        .route(
            endpoints::MONTHLY_STATISTICS,
            get(get_monthly_statistics::<T, A>),
        )
        .route(
            endpoints::STATISTICS_FOR_YEARS,
            get(get_statistics_for_years::<T, A>),
        )
        .route(endpoints::TAG_STATISTICS, get(get_tag_statistics::<T, A>))
        .route(
            endpoints::CURRENT_MONTH_SUM,
            get(get_current_month_sum::<T, A>),
        );

    let payment_routes = Router::new()
        .route(
            endpoints::PAYMENTS,
            post(create_payment::<T>).get(list_payments::<T>),
        )
        .route(endpoints::PAYMENT, put(update_payment::<T>));

    // The static transaction routes take precedence over `TRANSACTION`.
    let transaction_routes = Router::new()
        .route(endpoints::BALANCE, get(get_balance::<T, A>))
        .route(
            endpoints::INCOME_SPENT_PERCENTAGE,
            get(get_income_spent_percentage::<T, A>),
        )
        .route(
            endpoints::CUMULATIVE_BALANCE,
            get(get_cumulative_balance::<T, A>),
        )
        .route(endpoints::TRANSACTION, get(get_transaction::<T>));

    expense_routes
        .merge(payment_routes)
        .merge(transaction_routes)
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> (StatusCode, &'static str) {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot")
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
