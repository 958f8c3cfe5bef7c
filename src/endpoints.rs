//! The endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}/edit', use [format_endpoint].

/// The root route which redirects to the expense listing.
pub const ROOT: &str = "/";
/// The paged listing of all expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page for adding an expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The page for editing an existing expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";
/// The expenses and total for a single month.
pub const SUMMARY_VIEW: &str = "/summary";
/// The total spent in each month.
pub const MONTHLY_TOTALS_VIEW: &str = "/monthly_totals";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to list (GET) and create (POST) expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to get, update and delete a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route for a month summary as JSON.
pub const SUMMARY_API: &str = "/api/summary";
/// The route for the monthly totals as JSON.
pub const MONTHLY_TOTALS_API: &str = "/api/monthly_totals";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
