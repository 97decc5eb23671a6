//! The API endpoint paths.
//!
//! Paths with a parameter, e.g. `/expenses/{expense_id}`, use axum's brace syntax.

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/coffee";
/// The route for registering a new user.
pub const SIGN_UP: &str = "/auth/signup";
/// The route for logging in a user.
pub const LOG_IN: &str = "/auth/login";

/// The route to create and list expenses.
pub const EXPENSES: &str = "/expenses";
/// The route to update or delete a single expense.
pub const EXPENSE: &str = "/expenses/{expense_id}";
/// The route for the daily expense summaries of a month.
pub const DAILY_STATISTICS: &str = "/expenses/statistics/{year}/{month}";
/// The route for the monthly expense summaries of a year.
pub const MONTHLY_STATISTICS: &str = "/expenses/statistics/yearly/{year}";
/// The route for the monthly expense summaries of several years.
pub const STATISTICS_FOR_YEARS: &str = "/expenses/statistics/years";
/// The route for the per tag expense summaries.
pub const TAG_STATISTICS: &str = "/expenses/statistics";
/// The route for the sum of this month's expenses.
pub const CURRENT_MONTH_SUM: &str = "/expenses/current-month-sum";

/// The route to create and list payments.
pub const PAYMENTS: &str = "/payments";
/// The route to update a single payment.
pub const PAYMENT: &str = "/payments/{payment_id}";

/// The route for the user's balance.
pub const BALANCE: &str = "/balance";
/// The route for the share of income spent per month.
pub const INCOME_SPENT_PERCENTAGE: &str = "/transactions/income-spent-percentage";
/// The route for the balance at the end of each month.
pub const CUMULATIVE_BALANCE: &str = "/transactions/cumulative-balance";
/// The route to get a single expense or payment.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri}");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        for endpoint in [
            endpoints::COFFEE,
            endpoints::SIGN_UP,
            endpoints::LOG_IN,
            endpoints::EXPENSES,
            endpoints::EXPENSE,
            endpoints::DAILY_STATISTICS,
            endpoints::MONTHLY_STATISTICS,
            endpoints::STATISTICS_FOR_YEARS,
            endpoints::TAG_STATISTICS,
            endpoints::CURRENT_MONTH_SUM,
            endpoints::PAYMENTS,
            endpoints::PAYMENT,
            endpoints::BALANCE,
            endpoints::INCOME_SPENT_PERCENTAGE,
            endpoints::CUMULATIVE_BALANCE,
            endpoints::TRANSACTION,
        ] {
            assert_endpoint_is_valid_uri(endpoint);
        }
    }
}
