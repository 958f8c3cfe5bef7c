//! Defines the endpoint for replacing the fields of an expense.

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints,
    expense::{ExpenseForm, ExpenseId},
    store::SharedExpenseStore,
};

/// The state needed to edit an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The store for managing expenses.
    pub store: SharedExpenseStore,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for updating an expense, redirects to the expense listing on success.
pub async fn edit_expense_endpoint(
    State(state): State<EditExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let expense = match form.to_new_expense() {
        Ok(expense) => expense,
        Err(error) => {
            tracing::debug!("rejected expense form {form:?}: {error}");
            return error.into_alert_response();
        }
    };

    match state.store.update(expense_id, expense) {
        Ok(_) => (
            HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingExpense) => Error::UpdateMissingExpense.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while updating expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}
