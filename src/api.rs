//! Read-only JSON endpoints for the expense listing, single expenses, month
//! summaries and monthly totals.
//!
//! Errors are returned as `{"error": "<message>"}` with the status code from
//! [Error::status_code].

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    AppState, Error,
    expense::{Expense, ExpenseId},
    monthly_totals::{MonthlyTotals, get_monthly_totals},
    pagination::{ExpensePage, PaginationConfig, get_expense_page},
    params::{MonthQuery, PageQuery},
    store::SharedExpenseStore,
    summary::{MonthlySummary, get_monthly_summary},
    timezone::current_local_date,
};

/// The state needed by the JSON endpoints.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// The store to read expenses from.
    pub store: SharedExpenseStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The default page and page size for the listing.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// An [Error] rendered as a JSON body.
#[derive(Debug, PartialEq)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.0.status_code();

        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self.0);

            match self.0 {
                Error::InvalidTimezoneError(_) => self.0.to_string(),
                _ => "an unexpected error occurred, check the server logs for more details"
                    .to_owned(),
            }
        } else {
            self.0.to_string()
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

/// One page of expenses, newest first.
pub async fn get_expenses_json(
    State(state): State<ApiState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ExpensePage>, ApiError> {
    let request = query.to_page_request(&state.pagination_config)?;
    let page = get_expense_page(state.store.as_ref(), request)?;

    Ok(Json(page))
}

/// A single expense.
pub async fn get_expense_json(
    State(state): State<ApiState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Json<Expense>, ApiError> {
    let expense = state.store.get(expense_id)?;

    Ok(Json(expense))
}

/// The summary of the month in the query, defaulting to the current month.
pub async fn get_summary_json(
    State(state): State<ApiState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthlySummary>, ApiError> {
    let month = query.resolve(|| current_local_date(&state.local_timezone))?;
    let summary = get_monthly_summary(state.store.as_ref(), month)?;

    Ok(Json(summary))
}

/// The total spent in each month, keyed by `"month/year"` in chronological order.
pub async fn get_monthly_totals_json(
    State(state): State<ApiState>,
) -> Result<Json<MonthlyTotals>, ApiError> {
    let totals = get_monthly_totals(state.store.as_ref())?;

    Ok(Json(totals))
}
